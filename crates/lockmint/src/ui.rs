//! UI helper components

use alloy::primitives::{Address, U256};
use eframe::egui;
use lockmint_core::TierKind;

fn explorer_base(chain_name: &str) -> &'static str {
    match chain_name.to_lowercase().as_str() {
        "ethereum" | "mainnet" => "https://etherscan.io",
        "bsc" | "binance" => "https://bscscan.com",
        "bsc-testnet" => "https://testnet.bscscan.com",
        "polygon" => "https://polygonscan.com",
        "arbitrum" => "https://arbiscan.io",
        "base" => "https://basescan.org",
        "optimism" => "https://optimistic.etherscan.io",
        "avalanche" => "https://snowtrace.io",
        "sepolia" => "https://sepolia.etherscan.io",
        // The pool contracts live on BSC; treat it as home.
        _ => "https://bscscan.com",
    }
}

/// Block explorer URL for an address on a given chain
pub fn get_explorer_address_url(chain_name: &str, address: &str) -> String {
    format!("{}/address/{}", explorer_base(chain_name), address)
}

/// Block explorer URL for a transaction hash on a given chain
pub fn get_explorer_tx_url(chain_name: &str, tx_hash: &str) -> String {
    format!("{}/tx/{}", explorer_base(chain_name), tx_hash)
}

/// Open URL in a new browser tab
#[cfg(not(target_arch = "wasm32"))]
pub fn open_url_new_tab(url: &str) {
    let _ = open::that(url);
}

/// Copy to clipboard
#[cfg(not(target_arch = "wasm32"))]
pub fn copy_to_clipboard(text: &str) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(text);
    }
}

/// Render an address as a clickable hyperlink that opens in block explorer
pub fn address_link(ui: &mut egui::Ui, chain_name: &str, address: Address) -> egui::Response {
    let checksummed = address.to_string();
    let explorer_url = get_explorer_address_url(chain_name, &checksummed);

    let response = ui
        .link(egui::RichText::new(&checksummed).monospace())
        .on_hover_text("Open in block explorer");
    if response.clicked() {
        open_url_new_tab(&explorer_url);
    }
    response
}

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(egui::Color32::from_rgb(0, 212, 170)));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Create a styled text edit for address input
pub fn address_input(ui: &mut egui::Ui, value: &mut String) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text("0x...")
            .desired_width(400.0)
            .font(egui::TextStyle::Monospace),
    )
}

/// Loading spinner
pub fn loading_spinner(ui: &mut egui::Ui, label: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(label);
    });
}

/// Error message display
pub fn error_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("❌").size(16.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 80, 80)));
    });
}

/// Success message display
pub fn success_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("✅").size(16.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(80, 200, 120)));
    });
}

/// Warning message display
pub fn warning_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("⚠️").size(14.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 180, 50)));
    });
}

/// Display a hash value with copy button
pub fn copyable_hash(ui: &mut egui::Ui, hash: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(hash).monospace());
        if ui
            .small_button("📋")
            .on_hover_text("Copy to clipboard")
            .clicked()
        {
            copy_to_clipboard(hash);
        }
    });
}

/// Primary button with enabled state
pub fn primary_button_enabled(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    let accent = egui::Color32::from_rgb(0, 180, 150);
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0).color(egui::Color32::WHITE))
        .min_size(egui::vec2(130.0, 34.0))
        .fill(accent);
    ui.add_enabled(enabled, btn)
}

/// Render content in a subtle card/frame
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, add_contents);
}

// =============================================================================
// TIER ARTWORK
// =============================================================================

/// Accent color for a tier
pub fn tier_color(tier: TierKind) -> egui::Color32 {
    match tier {
        TierKind::Silver => egui::Color32::from_rgb(192, 192, 192),
        TierKind::Gold => egui::Color32::from_rgb(255, 215, 0),
        TierKind::Diamond => egui::Color32::from_rgb(185, 242, 255),
        TierKind::Platinum => egui::Color32::from_rgb(229, 228, 226),
    }
}

/// Medallion drawn where the collection artwork would sit
pub fn tier_badge(ui: &mut egui::Ui, tier: TierKind) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(96.0, 96.0), egui::Sense::hover());
    let painter = ui.painter();
    let center = rect.center();
    let color = tier_color(tier);

    painter.circle_filled(center, 44.0, color.linear_multiply(0.25));
    painter.circle_stroke(center, 44.0, egui::Stroke::new(3.0, color));
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        tier.label(),
        egui::FontId::proportional(16.0),
        color,
    );
}

// =============================================================================
// AMOUNT AND TIME FORMATTING
// =============================================================================

/// Render a raw uint amount using the token's decimals, with thousand
/// separators on the integer part.
pub fn format_units(value: U256, decimals: u8) -> String {
    let raw = value.to_string();
    if decimals == 0 {
        return add_thousand_separators(&raw);
    }

    let dec = decimals as usize;
    if raw.len() <= dec {
        let padded = format!("{raw:0>dec$}");
        let trimmed = padded.trim_end_matches('0');
        if trimmed.is_empty() {
            return "0.0".to_string();
        }
        return format!("0.{trimmed}");
    }

    let (int_part, dec_part) = raw.split_at(raw.len() - dec);
    let dec_trimmed = dec_part.trim_end_matches('0');
    let int_formatted = add_thousand_separators(int_part);

    if dec_trimmed.is_empty() {
        format!("{int_formatted}.0")
    } else {
        format!("{int_formatted}.{dec_trimmed}")
    }
}

/// Add thousand separators to a numeric string
fn add_thousand_separators(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format a unix timestamp as local wall-clock time, e.g. "14:05 28/02/2026".
pub fn format_wall_time(unix_secs: u64) -> String {
    i64::try_from(unix_secs)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|utc| {
            utc.with_timezone(&chrono::Local)
                .format("%H:%M %d/%m/%Y")
                .to_string()
        })
        .unwrap_or_else(|| "--".to_string())
}
