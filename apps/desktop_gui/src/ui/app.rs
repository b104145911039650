use std::collections::HashMap;

use client_core::{
    apply_card_action, CardAction, CardOutcome, CardScreen, CardView, ListenerRegistry, Route,
    Router, SwipeDeck, Transition,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use shared::domain::{Recipe, RecipeId};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::input::EguiInputTranslator;
use crate::controller::orchestration::dispatch_backend_command;
use crate::media::PreviewImage;

const APP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);
const CARD_FILL: egui::Color32 = egui::Color32::WHITE;
const CARD_TEXT: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
const CARD_MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(75, 85, 99);
const SAVE_FILL: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
const MAKE_NOW_FILL: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
const CARD_MAX_WIDTH: f32 = 448.0;
const THUMBNAIL_HEIGHT: f32 = 256.0;
const CARD_ANIMATION_SECS: f64 = 0.25;

fn ui_in_rect(ui: &mut egui::Ui, rect: egui::Rect, add: impl FnOnce(&mut egui::Ui)) {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    add(&mut child);
}

enum ThumbnailState {
    Loading,
    Ready {
        image: PreviewImage,
        texture: Option<TextureHandle>,
    },
    Failed,
}

struct CardAnimation {
    started_at: f64,
    transition: Transition,
}

impl CardAnimation {
    /// Horizontal offset and opacity at `now`; `None` once settled.
    fn sample(&self, now: f64) -> Option<(f32, f32)> {
        let t = ((now - self.started_at) / CARD_ANIMATION_SECS) as f32;
        if t >= 1.0 {
            return None;
        }
        let t = t.clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        Some((self.transition.enter_from_x * (1.0 - eased), eased))
    }
}

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

pub struct RecipeSwipeApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    deck: SwipeDeck,
    router: Router,
    listeners: ListenerRegistry,
    card_screen: Option<CardScreen>,
    swipe_threshold_px: f32,
    input: EguiInputTranslator,
    thumbnails: HashMap<RecipeId, ThumbnailState>,
    card_animation: Option<CardAnimation>,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl RecipeSwipeApp {
    pub fn new(
        settings: &Settings,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            deck: SwipeDeck::new(),
            router: Router::new(),
            listeners: ListenerRegistry::new(),
            card_screen: None,
            swipe_threshold_px: settings.swipe_threshold_px,
            input: EguiInputTranslator::default(),
            thumbnails: HashMap::new(),
            card_animation: None,
            status: String::new(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status_banner = Some(StatusBanner {
                        message: format!("{} error: {}", err_label(err.category()), err.message()),
                    });
                }
                UiEvent::RecipeFetched(recipe) => {
                    self.request_thumbnail(&recipe);
                    self.deck.append(recipe);
                    self.status = format!("{} recipes loaded", self.deck.len());
                }
                UiEvent::ThumbnailLoaded { recipe_id, image } => {
                    self.thumbnails.insert(
                        recipe_id,
                        ThumbnailState::Ready {
                            image,
                            texture: None,
                        },
                    );
                }
                UiEvent::ThumbnailFailed { recipe_id, reason } => {
                    let err = UiError::from_message(UiErrorContext::Thumbnail, reason);
                    self.status = format!(
                        "{} error loading image for {recipe_id}",
                        err_label(err.category())
                    );
                    self.thumbnails.insert(recipe_id, ThumbnailState::Failed);
                }
            }
        }
    }

    fn request_thumbnail(&mut self, recipe: &Recipe) {
        if recipe.thumbnail_url.is_empty() || self.thumbnails.contains_key(&recipe.id) {
            return;
        }
        self.thumbnails.insert(recipe.id.clone(), ThumbnailState::Loading);
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchThumbnail {
                recipe_id: recipe.id.clone(),
                url: recipe.thumbnail_url.clone(),
            },
            &mut self.status,
        );
    }

    fn thumbnail_texture(&mut self, ctx: &egui::Context, id: &RecipeId) -> Option<TextureHandle> {
        match self.thumbnails.get_mut(id)? {
            ThumbnailState::Ready { image, texture } => Some(
                texture
                    .get_or_insert_with(|| {
                        ctx.load_texture(
                            format!("recipe-thumbnail:{id}"),
                            image.to_color_image(),
                            egui::TextureOptions::LINEAR,
                        )
                    })
                    .clone(),
            ),
            ThumbnailState::Loading | ThumbnailState::Failed => None,
        }
    }

    fn thumbnail_loading(&self, id: &RecipeId) -> bool {
        matches!(self.thumbnails.get(id), Some(ThumbnailState::Loading))
    }

    /// Keeps the card screen, and with it the input listeners, alive exactly
    /// while the deck route is showing.
    fn sync_card_screen(&mut self) {
        let on_deck = matches!(self.router.current(), Route::Deck);
        match (on_deck, self.card_screen.is_some()) {
            (true, false) => {
                self.card_screen = Some(CardScreen::mount(
                    &self.listeners,
                    self.swipe_threshold_px,
                ));
            }
            (false, true) => self.card_screen = None,
            _ => {}
        }
    }

    fn handle_card_input(&mut self, ctx: &egui::Context) {
        let raw = ctx.input(|i| i.events.clone());
        let events = self.input.translate(&raw);
        let Some(screen) = self.card_screen.as_mut() else {
            return;
        };
        let mut moved = false;
        for event in events {
            if screen.handle_input(&mut self.deck, event).is_some() {
                moved = true;
            }
        }
        if moved {
            self.start_card_animation(ctx);
        }
    }

    fn start_card_animation(&mut self, ctx: &egui::Context) {
        self.card_animation = Some(CardAnimation {
            started_at: ctx.input(|i| i.time),
            transition: Transition::from_direction(self.deck.last_direction_signum()),
        });
    }

    fn apply_action(&mut self, ctx: &egui::Context, action: CardAction) {
        match apply_card_action(&mut self.deck, &mut self.router, action) {
            Ok(CardOutcome::Advanced { .. }) => self.start_card_animation(ctx),
            Ok(CardOutcome::Navigate(route)) => {
                self.status = format!("Opened {route}");
                self.sync_card_screen();
            }
            Err(err) => tracing::debug!(error = %err, ?action, "card action ignored"),
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
    }

    fn show_thumbnail(&mut self, ui: &mut egui::Ui, recipe: &Recipe, width: f32) {
        let size = egui::vec2(width, THUMBNAIL_HEIGHT);
        if let Some(texture) = self.thumbnail_texture(ui.ctx(), &recipe.id) {
            ui.add(
                egui::Image::new(&texture)
                    .fit_to_exact_size(size)
                    .maintain_aspect_ratio(false),
            )
            .on_hover_text(&recipe.name);
            return;
        }
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_rgb(229, 231, 235));
        if self.thumbnail_loading(&recipe.id) {
            ui_in_rect(ui, rect, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            });
        }
    }

    fn show_card(&mut self, ui: &mut egui::Ui, recipe: &Recipe) -> Option<CardAction> {
        let mut action = None;
        let width = ui.available_width().min(CARD_MAX_WIDTH);
        egui::Frame::NONE
            .fill(CARD_FILL)
            .corner_radius(12.0)
            .shadow(egui::Shadow {
                offset: [0, 12],
                blur: 32,
                spread: 0,
                color: egui::Color32::from_black_alpha(110),
            })
            .show(ui, |ui| {
                ui.set_width(width);
                self.show_thumbnail(ui, recipe, width);
                egui::Frame::NONE
                    .inner_margin(egui::Margin::same(24))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&recipe.name)
                                .size(24.0)
                                .strong()
                                .color(CARD_TEXT),
                        );
                        ui.add_space(8.0);
                        ui.label(
                            egui::RichText::new(format!("Category: {}", recipe.category))
                                .color(CARD_MUTED_TEXT),
                        );
                        ui.label(
                            egui::RichText::new(format!("Area: {}", recipe.area))
                                .color(CARD_MUTED_TEXT),
                        );
                        ui.add_space(16.0);
                        ui.horizontal(|ui| {
                            let save = egui::Button::new(
                                egui::RichText::new("Save").color(egui::Color32::WHITE),
                            )
                            .fill(SAVE_FILL)
                            .min_size(egui::vec2(96.0, 36.0));
                            if ui.add(save).clicked() {
                                action = Some(CardAction::Save);
                            }
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let make_now = egui::Button::new(
                                        egui::RichText::new("Make Now")
                                            .color(egui::Color32::WHITE),
                                    )
                                    .fill(MAKE_NOW_FILL)
                                    .min_size(egui::vec2(96.0, 36.0));
                                    if ui.add(make_now).clicked() {
                                        action = Some(CardAction::MakeNow);
                                    }
                                },
                            );
                        });
                    });
            });
        action
    }

    fn show_deck(&mut self, ctx: &egui::Context) {
        let current = match CardView::from_deck(&self.deck) {
            CardView::Loading => None,
            CardView::Card(card) => Some((card.recipe.clone(), card.position, card.total)),
        };
        let now = ctx.input(|i| i.time);
        let sample = self
            .card_animation
            .as_ref()
            .and_then(|anim| anim.sample(now));
        if sample.is_none() {
            self.card_animation = None;
        }

        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(APP_BACKGROUND).inner_margin(egui::Margin::same(16)))
            .show(ctx, |ui| {
                self.show_status_banner(ui);
                let Some((recipe, position, total)) = current else {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("Loading...")
                                .size(18.0)
                                .color(egui::Color32::WHITE),
                        );
                    });
                    return;
                };

                let avail = ui.available_rect_before_wrap();
                let width = avail.width().min(CARD_MAX_WIDTH);
                let top = avail.top() + (avail.height() * 0.08).clamp(8.0, 60.0);
                let (offset_x, opacity) = sample.unwrap_or((0.0, 1.0));
                let card_rect = egui::Rect::from_min_size(
                    egui::pos2(avail.center().x - width / 2.0 + offset_x, top),
                    egui::vec2(width, avail.bottom() - top),
                );
                ui_in_rect(ui, card_rect, |ui| {
                    ui.set_opacity(opacity);
                    action = self.show_card(ui, &recipe);
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new(format!("{} / {}", position + 1, total))
                            .small()
                            .color(egui::Color32::from_gray(160)),
                    );
                });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                    ui.small(
                        egui::RichText::new(&self.status).color(egui::Color32::from_gray(140)),
                    );
                });
            });

        if let Some(action) = action {
            self.apply_action(ctx, action);
        }
    }

    fn show_detail(&mut self, ctx: &egui::Context, id: &RecipeId) {
        let recipe = self
            .deck
            .recipes()
            .iter()
            .find(|recipe| &recipe.id == id)
            .cloned();
        let path = Route::RecipeDetail(id.clone()).path();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(APP_BACKGROUND).inner_margin(egui::Margin::same(16)))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CARD_MAX_WIDTH);
                    if ui.button("Back").clicked() {
                        self.router.back();
                    }
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new(&path).monospace().color(egui::Color32::GRAY));
                    if let Some(recipe) = &recipe {
                        let width = ui.available_width().min(CARD_MAX_WIDTH);
                        self.show_thumbnail(ui, recipe, width);
                        ui.add_space(8.0);
                        ui.heading(egui::RichText::new(&recipe.name).color(egui::Color32::WHITE));
                        ui.label(format!("{} · {}", recipe.category, recipe.area));
                    }
                });
            });
    }
}

impl eframe::App for RecipeSwipeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.sync_card_screen();
        self.handle_card_input(ctx);

        match self.router.current().clone() {
            Route::Deck => self.show_deck(ctx),
            Route::RecipeDetail(id) => self.show_detail(ctx, &id),
        }

        if self.card_animation.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CardAnimation, CARD_ANIMATION_SECS};
    use client_core::Transition;

    #[test]
    fn card_animation_slides_in_from_direction_and_settles() {
        let anim = CardAnimation {
            started_at: 10.0,
            transition: Transition::from_direction(1),
        };
        let (offset, opacity) = anim.sample(10.0).expect("animating");
        assert_eq!(offset, 300.0);
        assert_eq!(opacity, 0.0);

        let (mid_offset, _) = anim.sample(10.0 + CARD_ANIMATION_SECS / 2.0).expect("animating");
        assert!(mid_offset > 0.0 && mid_offset < 300.0);

        assert!(anim.sample(10.0 + CARD_ANIMATION_SECS).is_none());
    }
}
