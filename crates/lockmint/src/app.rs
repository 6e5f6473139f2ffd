//! Main application state and update loop

use alloy::primitives::{Address, B256};
use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lockmint_adapters::StakeConfig;
use lockmint_core::{
    lock_available, lock_button_enabled, redeem_button_enabled, LoadStep, StakeSnapshot, TierKind,
    TxReceipt,
};

use crate::bridge::StakeBridge;
use crate::state::{self, StakeViewState, TIER_STORAGE_KEY, WALLET_STORAGE_KEY};
use crate::ui;

/// Result from an async read sequence
type SnapshotOutcome = Result<StakeSnapshot, String>;

/// Result from an async lock or redeem submission
#[derive(Clone)]
pub enum SubmitResult {
    Success(TxReceipt),
    Error(String),
}

#[derive(Clone, Copy)]
enum PoolAction {
    Lock,
    Redeem,
}

pub struct App {
    config: StakeConfig,
    bridge: StakeBridge,

    /// Tier currently on display. Cosmetic; every tier shares the pool.
    tier: TierKind,
    view: StakeViewState,
    wallet_input: String,
    wallet: Option<Address>,
    wallet_error: Option<String>,

    // Slots written by worker threads, drained each frame. The initial
    // load owns its slot so a poll deposit landing between frames cannot
    // overwrite an undrained load outcome.
    load_result: Arc<Mutex<Option<SnapshotOutcome>>>,
    refresh_result: Arc<Mutex<Option<SnapshotOutcome>>>,
    submit_result: Arc<Mutex<Option<SubmitResult>>>,
    pending_hash: Arc<Mutex<Option<B256>>>,
    load_step: Arc<Mutex<Option<LoadStep>>>,

    /// Wallet the poll thread reads on each tick.
    poll_wallet: Arc<Mutex<Option<Address>>>,
    poll_stop: Arc<AtomicBool>,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, config: StakeConfig, bridge: StakeBridge) -> Self {
        let stored_wallet = cc
            .storage
            .and_then(|s| s.get_string(WALLET_STORAGE_KEY))
            .and_then(|raw| state::parse_wallet_input(&raw).ok().flatten());
        let stored_tier = cc
            .storage
            .and_then(|s| s.get_string(TIER_STORAGE_KEY))
            .and_then(|raw| raw.parse::<TierKind>().ok());

        // An explicit LOCKMINT_WALLET beats the previous session; the tier
        // falls back to the launch default only on first run.
        let wallet = config.wallet.or(stored_wallet);
        let wallet_input = wallet.map(|w| w.to_string()).unwrap_or_default();
        let tier = stored_tier.unwrap_or(config.initial_tier);

        let mut app = Self {
            config,
            bridge,
            tier,
            view: StakeViewState::default(),
            wallet_input,
            wallet,
            wallet_error: None,
            load_result: Arc::new(Mutex::new(None)),
            refresh_result: Arc::new(Mutex::new(None)),
            submit_result: Arc::new(Mutex::new(None)),
            pending_hash: Arc::new(Mutex::new(None)),
            load_step: Arc::new(Mutex::new(None)),
            poll_wallet: Arc::new(Mutex::new(wallet)),
            poll_stop: Arc::new(AtomicBool::new(false)),
        };

        app.start_poller(cc.egui_ctx.clone());
        app.trigger_initial_load(cc.egui_ctx.clone());
        app
    }

    /// Re-reads the chain every poll interval until the stop flag is raised
    /// on shutdown. A failed poll keeps the last good snapshot on screen.
    fn start_poller(&self, ctx: egui::Context) {
        let bridge = self.bridge.clone();
        let wallet = Arc::clone(&self.poll_wallet);
        let stop = Arc::clone(&self.poll_stop);
        let result = Arc::clone(&self.refresh_result);
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        std::thread::spawn(move || loop {
            std::thread::sleep(interval);
            if stop.load(Ordering::Relaxed) {
                break;
            }
            let wallet = *wallet.lock().unwrap();
            match bridge.refresh(wallet) {
                Ok(snapshot) => {
                    let mut guard = result.lock().unwrap();
                    *guard = Some(Ok(snapshot));
                    ctx.request_repaint();
                }
                Err(e) => tracing::debug!("background refresh failed: {e}"),
            }
        });
    }

    fn trigger_initial_load(&mut self, ctx: egui::Context) {
        self.view.reset_for_load();

        let bridge = self.bridge.clone();
        let wallet = self.wallet;
        let result = Arc::clone(&self.load_result);
        let step_slot = Arc::clone(&self.load_step);

        std::thread::spawn(move || {
            let mut on_step = |step: LoadStep| {
                let mut guard = step_slot.lock().unwrap();
                *guard = Some(step);
                ctx.request_repaint();
            };
            let outcome = bridge.load_snapshot(wallet, &mut on_step);

            let mut guard = result.lock().unwrap();
            *guard = Some(outcome.map_err(|e| e.to_string()));
            ctx.request_repaint();
        });
    }

    /// Silent re-read after a settled write; the page keeps rendering the
    /// previous snapshot until the fresh one lands.
    fn trigger_refresh(&self, ctx: &egui::Context) {
        let bridge = self.bridge.clone();
        let wallet = self.wallet;
        let result = Arc::clone(&self.refresh_result);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = bridge.refresh(wallet);
            let mut guard = result.lock().unwrap();
            *guard = Some(outcome.map_err(|e| e.to_string()));
            ctx.request_repaint();
        });
    }

    fn trigger_submit(&mut self, ctx: &egui::Context, action: PoolAction) {
        let Some(wallet) = self.wallet else {
            return;
        };
        self.view.begin_submission();

        let bridge = self.bridge.clone();
        let result = Arc::clone(&self.submit_result);
        let hash_slot = Arc::clone(&self.pending_hash);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let mut on_submit = |hash: B256| {
                let mut guard = hash_slot.lock().unwrap();
                *guard = Some(hash);
                ctx.request_repaint();
            };
            let outcome = match action {
                PoolAction::Lock => bridge.lock(wallet, &mut on_submit),
                PoolAction::Redeem => bridge.redeem(wallet, &mut on_submit),
            };

            let mut guard = result.lock().unwrap();
            *guard = Some(match outcome {
                Ok(receipt) => SubmitResult::Success(receipt),
                Err(e) => SubmitResult::Error(format!("{e}")),
            });
            ctx.request_repaint();
        });
    }

    fn apply_wallet_input(&mut self, ctx: &egui::Context) {
        match state::parse_wallet_input(&self.wallet_input) {
            Ok(wallet) => {
                self.wallet_error = None;
                if wallet != self.wallet {
                    self.wallet = wallet;
                    *self.poll_wallet.lock().unwrap() = wallet;
                    self.trigger_initial_load(ctx.clone());
                }
            }
            Err(e) => self.wallet_error = Some(e),
        }
    }

    fn check_load_step(&mut self) {
        let step = {
            let mut guard = self.load_step.lock().unwrap();
            guard.take()
        };

        if let Some(step) = step {
            self.view.apply_load_step(step);
        }
    }

    fn check_load_result(&mut self) {
        let outcome = {
            let mut guard = self.load_result.lock().unwrap();
            guard.take()
        };

        if let Some(outcome) = outcome {
            self.view.apply_load_outcome(outcome);
        }
    }

    fn check_refresh_result(&mut self) {
        let outcome = {
            let mut guard = self.refresh_result.lock().unwrap();
            guard.take()
        };

        if let Some(outcome) = outcome {
            if let Err(e) = &outcome {
                tracing::warn!("refresh failed: {e}");
            }
            self.view.apply_refresh_outcome(outcome);
        }
    }

    fn check_pending_hash(&mut self) {
        let hash = {
            let mut guard = self.pending_hash.lock().unwrap();
            guard.take()
        };

        if let Some(hash) = hash {
            self.view.note_pending_hash(hash);
        }
    }

    fn check_submit_result(&mut self, ctx: &egui::Context) {
        let result = {
            let mut guard = self.submit_result.lock().unwrap();
            guard.take()
        };

        if let Some(result) = result {
            match result {
                SubmitResult::Success(receipt) => {
                    self.view.apply_submit_success(receipt);
                    // Balances and lock status changed on-chain; re-read.
                    self.trigger_refresh(ctx);
                }
                SubmitResult::Error(e) => self.view.apply_submit_error(e),
            }
        }
    }

    fn render_stake_page(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui::tier_badge(ui, self.tier);
            ui.add_space(10.0);
            ui.vertical(|ui| {
                ui::styled_heading(ui, "Very Rare NFT");
                ui.label(format!(
                    "Lock your {} LP token to own a {} {} NFT",
                    self.config.token_symbol,
                    self.tier.label(),
                    self.config.collection_name
                ));
            });
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label("Wallet:");
            let response = ui::address_input(ui, &mut self.wallet_input);
            if response.lost_focus() {
                self.apply_wallet_input(ctx);
            }
        });
        if let Some(error) = self.wallet_error.clone() {
            ui::error_message(ui, &error);
        }

        ui.add_space(10.0);

        if !self.view.loaded {
            if let Some(error) = self.view.load_error.clone() {
                ui::error_message(ui, &error);
                ui.add_space(5.0);
                if ui.button("⟳ Retry").clicked() {
                    self.trigger_initial_load(ctx.clone());
                }
            } else {
                ui.add(
                    egui::ProgressBar::new(f32::from(self.view.percent) / 100.0)
                        .show_percentage()
                        .animate(true),
                );
            }
            return;
        }

        let Some(snapshot) = self.view.snapshot.clone() else {
            return;
        };

        ui::section_header(ui, "Pool");
        ui::card(ui, |ui| {
            ui.label(format!(
                "{} / {} minted",
                snapshot.overview.minted, self.config.max_mint_supply
            ));
            ui.label(format!(
                "Lock {} {} for {} minutes",
                ui::format_units(snapshot.overview.lock_amount, self.config.token_decimals),
                self.config.token_symbol,
                snapshot.overview.lock_period_minutes
            ));
            ui.horizontal(|ui| {
                ui.label("Lock pool:");
                ui::address_link(ui, &self.config.chain, self.config.lock_pool_address);
            });
        });

        match snapshot.position {
            Some(position) => {
                ui::section_header(ui, "Your position");
                ui::card(ui, |ui| {
                    ui.label(format!(
                        "Your balance: {} {}",
                        ui::format_units(position.balance, self.config.token_decimals),
                        self.config.token_symbol
                    ));
                    if position.is_locked {
                        ui.label(format!(
                            "You can redeem at: {}",
                            ui::format_wall_time(position.unlock_time_secs)
                        ));
                    }
                    if !position.is_locked && !position.allowed {
                        ui::warning_message(
                            ui,
                            "Approve the lock pool to spend your LP before locking.",
                        );
                    }
                });

                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if lock_available(&position) {
                        // Not gated on the allowance: the submission goes
                        // through and a short allowance comes back as the
                        // pool's revert in the error alert.
                        let enabled = lock_button_enabled(&position, self.view.processing);
                        let label = format!("Lock {}", self.config.token_symbol);
                        if ui::primary_button_enabled(ui, &label, enabled).clicked() {
                            self.trigger_submit(ctx, PoolAction::Lock);
                        }
                    } else {
                        let enabled = redeem_button_enabled(&position, self.view.processing);
                        if ui::primary_button_enabled(ui, "Redeem", enabled).clicked() {
                            self.trigger_submit(ctx, PoolAction::Redeem);
                        }
                    }
                });
            }
            None => {
                ui.add_space(10.0);
                ui.label("Enter a wallet address to see your balance and lock status.");
            }
        }

        ui.add_space(10.0);

        if self.view.processing {
            let label = if self.view.tx_hash.is_some() {
                "Waiting for confirmation..."
            } else {
                "Waiting for the wallet..."
            };
            ui::loading_spinner(ui, label);
        }
        if let Some(error) = &self.view.error {
            ui::error_message(ui, error);
        }
        if let Some(hash) = self.view.tx_hash {
            if !self.view.processing && self.view.error.is_none() {
                ui::success_message(ui, "Transaction confirmed");
            }
            ui::copyable_hash(ui, &format!("{hash}"));
            if ui.link("View on explorer").clicked() {
                ui::open_url_new_tab(&ui::get_explorer_tx_url(
                    &self.config.chain,
                    &format!("{hash}"),
                ));
            }
        }

        ui.add_space(15.0);
        ui.label(
            egui::RichText::new(format!(
                "Updated {}",
                ui::format_wall_time(snapshot.fetched_at_ms / 1000)
            ))
            .weak()
            .small(),
        );
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.check_load_step();
        self.check_load_result();
        self.check_refresh_result();
        self.check_pending_hash();
        self.check_submit_result(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("🔐 LockMint")
                        .size(22.0)
                        .color(egui::Color32::from_rgb(0, 212, 170)),
                );
                ui.add_space(20.0);
                for tier in TierKind::ALL {
                    ui.selectable_value(
                        &mut self.tier,
                        tier,
                        egui::RichText::new(tier.label()).color(ui::tier_color(tier)),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode = if self.config.rpc_url.is_some() {
                        self.config.chain.as_str()
                    } else {
                        "offline"
                    };
                    ui.label(
                        egui::RichText::new(format!("{mode} · build {}", env!("GIT_HASH")))
                            .weak()
                            .small(),
                    );
                });
            });
            ui.add_space(8.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_stake_page(ui, ctx);
            });
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(WALLET_STORAGE_KEY, self.wallet_input.trim().to_owned());
        storage.set_string(TIER_STORAGE_KEY, self.tier.label().to_owned());
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // The poll thread re-checks the flag after each sleep and exits.
        self.poll_stop.store(true, Ordering::Relaxed);
    }
}
