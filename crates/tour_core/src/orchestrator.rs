//! The tour stage machine.
//!
//! `TourOrchestrator` is sans-IO: every operation mutates the state record and
//! queues [`TourEffect`]s, which the caller drains with
//! [`TourOrchestrator::take_effects`]. Timers are requested through
//! `ArmTimer`/`CancelTimer` effects and come back through
//! [`TourOrchestrator::on_timer`] carrying the token they were armed with.

use std::sync::Arc;

use catalog::Catalog;
use shared::{
    domain::{DetailTicket, Part, PartId, TimerRole, TourStage, View},
    protocol::{DetailOrigin, DetailView, GalleryView, SlideView, StageView, TourCommand, TourSnapshot},
};
use tracing::{debug, info, warn};

use crate::{
    effect::TourEffect,
    gallery::GalleryCursor,
    settings::{ManualClosePolicy, TourSettings},
    timer::{DelayedAction, TimerSlots, TimerStep, TimerToken},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailSubject {
    /// Opened by the hotspot walk; the part is the one under the hotspot cursor.
    Tour,
    /// Opened by a hotspot click.
    User(PartId),
}

#[derive(Debug, Clone, Copy)]
struct OpenDetail {
    ticket: DetailTicket,
    subject: DetailSubject,
}

pub struct TourOrchestrator {
    catalog: Arc<Catalog>,
    settings: TourSettings,
    stage: TourStage,
    active_view: View,
    hotspot_cursor: usize,
    slideshow_cursor: Option<usize>,
    carousel_cursor: Option<usize>,
    detail: Option<OpenDetail>,
    gallery: Option<GalleryCursor>,
    timers: TimerSlots,
    next_ticket: u64,
    started: bool,
    exit_sequence_fired: bool,
    dismissed: bool,
    effects: Vec<TourEffect>,
}

impl TourOrchestrator {
    pub fn new(catalog: Arc<Catalog>, settings: TourSettings) -> Self {
        Self {
            catalog,
            settings,
            stage: TourStage::Waiting,
            active_view: View::Front,
            hotspot_cursor: 0,
            slideshow_cursor: None,
            carousel_cursor: None,
            detail: None,
            gallery: None,
            timers: TimerSlots::default(),
            next_ticket: 0,
            started: false,
            exit_sequence_fired: false,
            dismissed: false,
            effects: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &TourSettings {
        &self.settings
    }

    pub fn stage(&self) -> TourStage {
        self.stage
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn hotspot_cursor(&self) -> usize {
        self.hotspot_cursor
    }

    pub fn slideshow_cursor(&self) -> Option<usize> {
        self.slideshow_cursor
    }

    pub fn carousel_cursor(&self) -> Option<usize> {
        self.carousel_cursor
    }

    pub fn gallery_index(&self) -> Option<usize> {
        self.gallery.map(|cursor| cursor.index())
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn exit_sequence_fired(&self) -> bool {
        self.exit_sequence_fired
    }

    pub fn is_timer_armed(&self, role: TimerRole) -> bool {
        self.timers.is_armed(role)
    }

    pub fn timer_token(&self, role: TimerRole) -> Option<TimerToken> {
        self.timers.token(role)
    }

    pub fn live_timer_count(&self) -> usize {
        self.timers.live_count()
    }

    /// True while a closed walk detail waits for its cursor advance.
    pub fn is_advance_pending(&self) -> bool {
        self.stage.is_hotspot_walk()
            && self.detail.is_none()
            && !self.timers.is_armed(TimerRole::OpenDetail)
            && self.timers.pending_step(TimerRole::Advance) == Some(TimerStep::AdvanceHotspot)
    }

    pub fn take_effects(&mut self) -> Vec<TourEffect> {
        std::mem::take(&mut self.effects)
    }

    /// The part shown by the detail presenter, derived from the open detail
    /// and, for tour details, the hotspot cursor.
    pub fn selected_part(&self) -> Option<&Part> {
        self.detail.and_then(|open| self.part_for(open.subject))
    }

    pub fn detail_view(&self) -> Option<DetailView> {
        let open = self.detail?;
        let part = self.part_for(open.subject)?;
        let origin = match open.subject {
            DetailSubject::Tour => DetailOrigin::Tour,
            DetailSubject::User(_) => DetailOrigin::User,
        };

        Some(DetailView {
            ticket: open.ticket,
            part_id: part.id,
            name: part.name.clone(),
            description: part.description.clone(),
            specs: part.specs.clone(),
            safety_note: part.safety_note.clone(),
            media: part.media_or_placeholder(),
            skippable: true,
            origin,
        })
    }

    pub fn stage_view(&self) -> StageView {
        StageView {
            view: self.active_view,
            hotspots: self.catalog.hotspots(self.active_view),
            clicks_ignored: self.stage.is_hotspot_walk(),
        }
    }

    pub fn snapshot(&self) -> TourSnapshot {
        TourSnapshot {
            stage: self.stage,
            view: self.active_view,
            hotspot_cursor: self.hotspot_cursor,
            slideshow_cursor: self.slideshow_cursor,
            carousel_cursor: self.carousel_cursor,
            selected_part: self.selected_part().map(|part| part.id),
            gallery_index: self.gallery_index(),
        }
    }

    pub fn apply(&mut self, command: TourCommand) {
        match command {
            TourCommand::PartClicked { part_id } => self.part_clicked(part_id),
            TourCommand::DetailClosed { ticket } => self.detail_closed(ticket),
            TourCommand::SkipRequested { ticket } => self.skip(ticket),
            TourCommand::VideoFinished { ticket } => self.video_finished(ticket),
            TourCommand::SelectView { view } => self.select_view(view),
            TourCommand::CloseSlide => self.close_slide(),
            TourCommand::OpenGallery { index } => self.open_gallery(index),
            TourCommand::GalleryNext => self.gallery_next(),
            TourCommand::GalleryPrev => self.gallery_prev(),
            TourCommand::CloseGallery => self.close_gallery(),
            TourCommand::Stop => self.stop(),
            TourCommand::Restart => self.restart(),
            TourCommand::Dismiss => self.dismiss(),
        }
    }

    /// Renders the initial stage and arms the waiting delay.
    pub fn start(&mut self) {
        if self.dismissed || self.started {
            return;
        }
        self.started = true;
        info!(
            front_parts = self.catalog.visible_count(View::Front),
            back_parts = self.catalog.visible_count(View::Back),
            slides = self.catalog.slideshow.len(),
            "starting tour"
        );
        self.render_stage();
        if self.stage == TourStage::Waiting {
            self.arm_waiting();
        }
    }

    pub fn on_timer(&mut self, role: TimerRole, token: TimerToken) {
        if self.dismissed {
            return;
        }
        let Some(due) = self.timers.take_due(role, token) else {
            debug!(role = ?role, token = token.0, "dropping stale timer");
            return;
        };

        debug!(role = ?role, token = token.0, step = ?due.step, stage = %self.stage, "timer fired");
        self.run_step(due.step);

        if let Some(rest) = due.rest {
            if !self.timers.is_armed(role) {
                self.timers.arm(role, rest, &mut self.effects);
            }
        }
    }

    pub fn part_clicked(&mut self, part_id: PartId) {
        if self.dismissed {
            return;
        }
        if self.stage.is_hotspot_walk() {
            debug!(part_id = part_id.0, stage = %self.stage, "ignoring hotspot click during automatic walk");
            return;
        }
        if self.detail.is_some() {
            debug!(part_id = part_id.0, "ignoring hotspot click while a detail is open");
            return;
        }

        match self.catalog.part(part_id).map(|part| part.is_visible_in(self.active_view)) {
            None => {
                warn!(part_id = part_id.0, "click on unknown part");
            }
            Some(false) => {
                warn!(part_id = part_id.0, view = %self.active_view, "click on part without a hotspot in this view");
            }
            Some(true) => {
                let ticket = self.issue_ticket();
                self.detail = Some(OpenDetail {
                    ticket,
                    subject: DetailSubject::User(part_id),
                });
                info!(part_id = part_id.0, ticket = ticket.0, "opened detail from hotspot click");
                self.show_detail();
            }
        }
    }

    pub fn detail_closed(&mut self, ticket: DetailTicket) {
        let Some(open) = self.current_detail(ticket) else {
            return;
        };

        match open.subject {
            DetailSubject::User(_) => self.close_detail(),
            DetailSubject::Tour => {
                self.timers.cancel(TimerRole::OpenDetail, &mut self.effects);
                self.timers.cancel(TimerRole::Advance, &mut self.effects);
                self.close_detail();
                match self.settings.manual_close_policy {
                    ManualClosePolicy::Advance => {
                        let delay = self.settings.close_settle() + self.settings.inter_detail_delay();
                        self.timers.arm(
                            TimerRole::Advance,
                            DelayedAction::after(delay, TimerStep::AdvanceHotspot),
                            &mut self.effects,
                        );
                    }
                    ManualClosePolicy::Hold => {
                        info!(cursor = self.hotspot_cursor, stage = %self.stage, "walk held after manual close");
                    }
                }
            }
        }
    }

    /// Closes the open detail; in a hotspot walk the cursor advances after the
    /// skip settle delay. The advance is the only pending walk timer until it
    /// fires, so the skipped detail cannot reopen in between.
    pub fn skip(&mut self, ticket: DetailTicket) {
        let Some(open) = self.current_detail(ticket) else {
            return;
        };

        match open.subject {
            DetailSubject::User(_) => self.close_detail(),
            DetailSubject::Tour => {
                self.timers.cancel(TimerRole::OpenDetail, &mut self.effects);
                self.close_detail();
                self.timers.arm(
                    TimerRole::Advance,
                    DelayedAction::after(self.settings.skip_settle(), TimerStep::AdvanceHotspot),
                    &mut self.effects,
                );
                info!(cursor = self.hotspot_cursor, stage = %self.stage, "skipped hotspot detail");
            }
        }
    }

    pub fn video_finished(&mut self, ticket: DetailTicket) {
        let Some(open) = self.current_detail(ticket) else {
            return;
        };

        match open.subject {
            DetailSubject::User(_) => {
                debug!(ticket = ticket.0, "video finished on user-opened detail");
            }
            DetailSubject::Tour => {
                self.timers.arm(
                    TimerRole::Advance,
                    DelayedAction::after(self.settings.close_settle(), TimerStep::CloseDetail)
                        .then(self.settings.inter_detail_delay(), TimerStep::AdvanceHotspot),
                    &mut self.effects,
                );
            }
        }
    }

    /// Manual view toggle. The walk keeps evaluating against the view fixed
    /// by its stage entry.
    pub fn select_view(&mut self, view: View) {
        if self.dismissed || self.active_view == view {
            return;
        }
        debug!(from = %self.active_view, to = %view, "view selected");
        self.active_view = view;
        self.render_stage();
    }

    /// Closing a slideshow frame moves on exactly like the frame timer.
    pub fn close_slide(&mut self) {
        if self.dismissed || self.stage != TourStage::PostBackSlideshow {
            return;
        }
        if self.slideshow_cursor.is_none() {
            debug!("ignoring slide close before the slideshow has begun");
            return;
        }
        self.advance_slide();
    }

    pub fn open_gallery(&mut self, index: usize) {
        if self.dismissed {
            return;
        }
        match GalleryCursor::open(index, self.catalog.gallery.len()) {
            Some(cursor) => {
                self.gallery = Some(cursor);
                self.show_gallery();
            }
            None => debug!("gallery is empty"),
        }
    }

    pub fn gallery_next(&mut self) {
        if self.dismissed {
            return;
        }
        if let Some(cursor) = self.gallery.as_mut() {
            cursor.step_forward();
            self.show_gallery();
        }
    }

    pub fn gallery_prev(&mut self) {
        if self.dismissed {
            return;
        }
        if let Some(cursor) = self.gallery.as_mut() {
            cursor.step_back();
            self.show_gallery();
        }
    }

    pub fn close_gallery(&mut self) {
        if self.gallery.take().is_some() {
            self.effects.push(TourEffect::CloseGallery);
        }
    }

    pub fn stop(&mut self) {
        if self.dismissed || self.stage == TourStage::Stopped {
            debug!(stage = %self.stage, "stop ignored");
            return;
        }

        self.timers.cancel_all(&mut self.effects);
        self.effects.push(TourEffect::HaltMotion);
        self.close_detail();
        self.close_slideshow();
        self.clear_carousel();
        self.hotspot_cursor = 0;
        self.set_stage(TourStage::Stopped);
        self.render_stage();
    }

    pub fn restart(&mut self) {
        if self.dismissed || self.stage != TourStage::Stopped {
            debug!(stage = %self.stage, "restart ignored");
            return;
        }

        self.started = true;
        self.hotspot_cursor = 0;
        self.slideshow_cursor = None;
        self.carousel_cursor = None;
        self.close_detail();
        self.exit_sequence_fired = false;
        self.set_stage(TourStage::Waiting);
        self.render_stage();
        self.arm_waiting();
    }

    /// Tears the tour down for good; every later call is a no-op.
    pub fn dismiss(&mut self) {
        if self.dismissed {
            return;
        }
        self.timers.cancel_all(&mut self.effects);
        self.close_detail();
        self.close_slideshow();
        self.clear_carousel();
        self.close_gallery();
        self.dismissed = true;
        info!(stage = %self.stage, "tour dismissed");
    }

    fn run_step(&mut self, step: TimerStep) {
        match step {
            TimerStep::EnterFrontHotspots => {
                if self.stage == TourStage::Waiting {
                    self.enter_hotspot_walk(TourStage::FrontHotspots);
                }
            }
            TimerStep::EnterBackHotspots => {
                if self.stage == TourStage::SwitchingToBack {
                    self.enter_hotspot_walk(TourStage::BackHotspots);
                }
            }
            TimerStep::OpenDetail { index } => self.open_tour_detail(index),
            TimerStep::CloseDetail => self.close_detail(),
            TimerStep::AdvanceHotspot => {
                if self.stage.is_hotspot_walk() {
                    self.hotspot_cursor += 1;
                    self.evaluate_walk();
                }
            }
            TimerStep::BeginSlideshow => {
                if self.stage == TourStage::PostBackSlideshow && self.slideshow_cursor.is_none() {
                    self.slideshow_cursor = Some(0);
                    self.evaluate_slideshow();
                }
            }
            TimerStep::AdvanceSlide => {
                if self.stage == TourStage::PostBackSlideshow && self.slideshow_cursor.is_some() {
                    self.advance_slide();
                }
            }
            TimerStep::AdvanceCarousel => {
                if let (TourStage::AccessoriesCarousel, Some(index)) =
                    (self.stage, self.carousel_cursor)
                {
                    self.carousel_cursor = Some(index + 1);
                    self.evaluate_carousel();
                }
            }
        }
    }

    fn enter_hotspot_walk(&mut self, stage: TourStage) {
        let Some(view) = stage.hotspot_view() else {
            return;
        };

        self.close_detail();
        self.set_stage(stage);
        self.active_view = view;
        self.hotspot_cursor = 0;
        self.render_stage();
        self.evaluate_walk();
    }

    fn evaluate_walk(&mut self) {
        let Some(view) = self.stage.hotspot_view() else {
            return;
        };

        if self.hotspot_cursor < self.catalog.visible_count(view) {
            self.schedule_tour_detail(self.hotspot_cursor);
            return;
        }

        match self.stage {
            TourStage::FrontHotspots => self.begin_switch_to_back(),
            TourStage::BackHotspots => self.finish_back_walk(),
            _ => {}
        }
    }

    fn schedule_tour_detail(&mut self, index: usize) {
        self.timers.cancel(TimerRole::Advance, &mut self.effects);
        self.timers.arm(
            TimerRole::OpenDetail,
            DelayedAction::after(
                self.settings.inter_detail_delay(),
                TimerStep::OpenDetail { index },
            ),
            &mut self.effects,
        );
    }

    fn open_tour_detail(&mut self, index: usize) {
        let Some(view) = self.stage.hotspot_view() else {
            return;
        };
        if index != self.hotspot_cursor {
            debug!(index, cursor = self.hotspot_cursor, "dropping open for a superseded hotspot");
            return;
        }

        let dwell = match self.catalog.part_in_view_at(view, index) {
            Some(part) if part.media.as_ref().is_some_and(|media| media.is_video()) => None,
            Some(part) => Some(self.settings.detail_dwell(part.description.as_deref())),
            None => {
                self.close_detail();
                return;
            }
        };

        self.close_detail();
        let ticket = self.issue_ticket();
        self.detail = Some(OpenDetail {
            ticket,
            subject: DetailSubject::Tour,
        });
        self.show_detail();

        match dwell {
            Some(dwell) => {
                let settle = self.settings.close_settle() + self.settings.inter_detail_delay();
                self.timers.arm(
                    TimerRole::Advance,
                    DelayedAction::after(dwell, TimerStep::CloseDetail)
                        .then(settle, TimerStep::AdvanceHotspot),
                    &mut self.effects,
                );
            }
            None => {
                debug!(index, ticket = ticket.0, "video detail open, waiting for playback to finish");
            }
        }
    }

    fn begin_switch_to_back(&mut self) {
        self.timers.cancel(TimerRole::OpenDetail, &mut self.effects);
        self.close_detail();
        self.set_stage(TourStage::SwitchingToBack);
        self.render_stage();
        self.timers.arm(
            TimerRole::Advance,
            DelayedAction::after(
                self.settings.switch_to_back_delay(),
                TimerStep::EnterBackHotspots,
            ),
            &mut self.effects,
        );
    }

    fn finish_back_walk(&mut self) {
        self.timers.cancel(TimerRole::OpenDetail, &mut self.effects);
        self.close_detail();
        self.slideshow_cursor = None;
        self.set_stage(TourStage::PostBackSlideshow);
        self.render_stage();
        self.effects.push(TourEffect::ScrollNudge);
        self.timers.arm(
            TimerRole::Advance,
            DelayedAction::after(self.settings.slideshow_lead_in(), TimerStep::BeginSlideshow),
            &mut self.effects,
        );
    }

    fn advance_slide(&mut self) {
        self.slideshow_cursor = self.slideshow_cursor.map(|index| index + 1);
        self.evaluate_slideshow();
    }

    fn evaluate_slideshow(&mut self) {
        let Some(index) = self.slideshow_cursor else {
            return;
        };

        let total = self.catalog.slideshow.len();
        let slide = self.catalog.slideshow.get(index).map(|slide| SlideView {
            index,
            total,
            src: slide.src.clone(),
            alt: slide.alt.clone(),
        });

        match slide {
            Some(slide) => {
                self.effects.push(TourEffect::ShowSlide(slide));
                self.timers.arm(
                    TimerRole::Sequence,
                    DelayedAction::after(self.settings.slideshow_frame(), TimerStep::AdvanceSlide),
                    &mut self.effects,
                );
            }
            None => self.finish_slideshow(),
        }
    }

    fn finish_slideshow(&mut self) {
        self.timers.cancel(TimerRole::Sequence, &mut self.effects);
        self.close_slideshow();

        if self.settings.showcase_features {
            self.set_stage(TourStage::AccessoriesCarousel);
            self.carousel_cursor = Some(0);
            self.render_stage();
            self.evaluate_carousel();
        } else {
            self.enter_done();
        }
    }

    fn evaluate_carousel(&mut self) {
        let Some(index) = self.carousel_cursor else {
            return;
        };

        if index < self.catalog.features.len() {
            self.effects.push(TourEffect::HighlightFeature(Some(index)));
            self.timers.arm(
                TimerRole::Sequence,
                DelayedAction::after(self.settings.carousel_item(), TimerStep::AdvanceCarousel),
                &mut self.effects,
            );
        } else {
            self.timers.cancel(TimerRole::Sequence, &mut self.effects);
            self.clear_carousel();
            self.enter_done();
        }
    }

    fn enter_done(&mut self) {
        self.set_stage(TourStage::Done);
        self.render_stage();
        if !self.exit_sequence_fired {
            self.exit_sequence_fired = true;
            info!("tour complete, running exit sequence");
            self.effects.push(TourEffect::RunExitSequence);
        }
    }

    fn arm_waiting(&mut self) {
        self.timers.arm(
            TimerRole::Advance,
            DelayedAction::after(self.settings.waiting_delay(), TimerStep::EnterFrontHotspots),
            &mut self.effects,
        );
    }

    fn set_stage(&mut self, to: TourStage) {
        let from = self.stage;
        if from == to {
            return;
        }
        self.stage = to;
        info!(from = %from, to = %to, "tour stage changed");
        self.effects.push(TourEffect::StageChanged { from, to });
    }

    fn render_stage(&mut self) {
        let view = self.stage_view();
        self.effects.push(TourEffect::RenderStage(view));
    }

    fn show_detail(&mut self) {
        if let Some(view) = self.detail_view() {
            self.effects.push(TourEffect::ShowDetail(view));
        }
    }

    fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.effects.push(TourEffect::CloseDetail);
        }
    }

    fn close_slideshow(&mut self) {
        if self.slideshow_cursor.take().is_some() {
            self.effects.push(TourEffect::CloseSlideshow);
        }
    }

    fn clear_carousel(&mut self) {
        if self.carousel_cursor.take().is_some() {
            self.effects.push(TourEffect::HighlightFeature(None));
        }
    }

    fn show_gallery(&mut self) {
        let Some(cursor) = self.gallery else {
            return;
        };
        if let Some(image) = self.catalog.gallery.get(cursor.index()) {
            let view = GalleryView {
                index: cursor.index(),
                total: cursor.total(),
                src: image.src.clone(),
                alt: image.alt.clone(),
            };
            self.effects.push(TourEffect::ShowGallery(view));
        }
    }

    fn issue_ticket(&mut self) -> DetailTicket {
        self.next_ticket += 1;
        DetailTicket(self.next_ticket)
    }

    fn current_detail(&self, ticket: DetailTicket) -> Option<OpenDetail> {
        if self.dismissed {
            return None;
        }
        match self.detail {
            Some(open) if open.ticket == ticket => Some(open),
            _ => {
                debug!(ticket = ticket.0, "ignoring event for a detail that is no longer shown");
                None
            }
        }
    }

    fn part_for(&self, subject: DetailSubject) -> Option<&Part> {
        match subject {
            DetailSubject::Tour => self
                .stage
                .hotspot_view()
                .and_then(|view| self.catalog.part_in_view_at(view, self.hotspot_cursor)),
            DetailSubject::User(part_id) => self.catalog.part(part_id),
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
