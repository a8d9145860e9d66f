//! Composition session: owns the live editing state and routes input
//! into the capture engine and the transform controller.
//!
//! The session is the error boundary. Every fallible operation returns a
//! `Result` for the host and also queues a [`Notice`] describing the
//! outcome; the session stays usable after any failure.

use crate::capture::{BrushSettings, CaptureEngine, CapturedSignature};
use crate::input::InputEvent;
use crate::persist::SavedState;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::throttle::Timer;
use crate::transform::TransformController;
use crate::upload::UploadCandidate;
use sigil_core::registry::export_filename;
use sigil_core::{
    AssetKind, BackgroundSettings, BackgroundType, Color, ColorSlot, EditorConfig, Error, ExportError,
    GradientDirection, Handle, LoadError, Point, SignatureBox, SignatureOrigin, Team, Transform, TransformField,
    signature_box, team_by_prefix,
};
use sigil_render::hit::{Hit, hit_test};
use sigil_render::load::{ImagePolicy, load_image, load_template};
use sigil_render::paint::{Compositor, ExportedImage, Scene, export_png};
use sigil_render::raster::{Raster, SignatureAsset};
use std::path::Path;
use std::time::Instant;

/// Surface size used before any template is chosen.
pub const DEFAULT_SURFACE: (u32, u32) = (512, 512);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the host to show (toast, status line, log).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Where a newly set signature is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Top-left at the given surface position.
    At(f64, f64),
    /// Centered on the surface at its intrinsic size.
    Centered,
}

/// Work that came due in [`CompositionSession::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Due {
    pub render: bool,
    pub save: bool,
}

pub struct CompositionSession {
    config: EditorConfig,

    team: Option<Team>,
    asset_kind: Option<AssetKind>,
    background: Option<Raster>,
    settings: BackgroundSettings,

    signature: Option<SignatureAsset>,
    transform: Transform,
    box_visible: bool,

    controller: TransformController,
    capture: CaptureEngine,
    brush: BrushSettings,
    compositor: Option<Compositor>,

    notices: Vec<Notice>,
    render_dirty: bool,
    save_dirty: bool,
    render_timer: Timer,
    save_timer: Timer,
}

impl Default for CompositionSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CompositionSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            controller: TransformController::new(config.limits),
            capture: CaptureEngine::new(config.drawing),
            brush: BrushSettings::from_config(&config.drawing),
            render_timer: Timer::throttle(config.timing.render_debounce()),
            save_timer: Timer::debounce(config.timing.save_debounce()),
            config,
            team: None,
            asset_kind: None,
            background: None,
            settings: BackgroundSettings::default(),
            signature: None,
            transform: Transform::default(),
            box_visible: false,
            compositor: Compositor::new(DEFAULT_SURFACE.0, DEFAULT_SURFACE.1).ok(),
            notices: Vec::new(),
            render_dirty: false,
            save_dirty: false,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref()
    }

    pub fn asset_kind(&self) -> Option<AssetKind> {
        self.asset_kind
    }

    pub fn background(&self) -> Option<&Raster> {
        self.background.as_ref()
    }

    pub fn background_settings(&self) -> &BackgroundSettings {
        &self.settings
    }

    pub fn signature(&self) -> Option<&SignatureAsset> {
        self.signature.as_ref()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    pub fn capture(&self) -> &CaptureEngine {
        &self.capture
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_armed()
    }

    pub fn is_box_visible(&self) -> bool {
        self.box_visible
    }

    /// Pixel size of the composite, from the selected template.
    pub fn surface_size(&self) -> (u32, u32) {
        self.asset_kind
            .map(|k| {
                let t = k.template();
                (t.width, t.height)
            })
            .unwrap_or(DEFAULT_SURFACE)
    }

    // ─── Notices & dirty tracking ────────────────────────────────────────

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        log::debug!("notice {:?}: {}", level, message);
        self.notices.push(Notice { level, message });
    }

    /// Log a failure and queue its user-facing text.
    fn report(&mut self, err: &Error) {
        match err {
            Error::Validation(_) | Error::Load(_) | Error::Read(_) => log::warn!("{}", err),
            Error::Export(_) | Error::Persist(_) => log::error!("{}", err),
        }
        self.notify(NoticeLevel::Error, err.notice_text());
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn touch(&mut self) {
        self.render_dirty = true;
        self.save_dirty = true;
    }

    /// Advance the render throttle and the autosave debounce.
    pub fn poll(&mut self, now: Instant) -> Due {
        if std::mem::take(&mut self.render_dirty) {
            self.render_timer.schedule(now);
        }
        if std::mem::take(&mut self.save_dirty) {
            self.save_timer.schedule(now);
        }
        Due {
            render: self.render_timer.poll(now),
            save: self.save_timer.poll(now),
        }
    }

    /// Report all pending work as due, e.g. before shutdown.
    pub fn flush(&mut self) -> Due {
        let render = std::mem::take(&mut self.render_dirty) | self.render_timer.flush();
        let save = std::mem::take(&mut self.save_dirty) | self.save_timer.flush();
        Due { render, save }
    }

    // ─── Team, template, background ──────────────────────────────────────

    /// Select a team by prefix. An unknown or empty prefix clears the
    /// team, the asset kind and the background.
    pub fn select_team(&mut self, prefix: &str) -> Option<Team> {
        let team = team_by_prefix(prefix);
        match team {
            Some(t) => {
                log::debug!("team {}", t.prefix);
                if self.team.map(|old| old.prefix) != Some(t.prefix) {
                    self.background = None;
                }
            }
            None => {
                self.asset_kind = None;
                self.background = None;
            }
        }
        self.team = team;
        self.touch();
        team
    }

    /// Install a loaded template image for `kind`.
    ///
    /// Custom backgrounds only apply to sticker kinds; other kinds force
    /// the background type back to `Original`.
    pub fn set_background(&mut self, kind: AssetKind, image: Raster) -> Result<(), LoadError> {
        let template = kind.template();
        match self.compositor.as_mut() {
            Some(c) => c.resize(template.width, template.height)?,
            None => self.compositor = Some(Compositor::new(template.width, template.height)?),
        }
        if !kind.is_sticker() {
            self.settings.kind = BackgroundType::Original;
        }
        log::debug!(
            "background {} ({}x{} image on {}x{} surface)",
            kind.key(),
            image.width(),
            image.height(),
            template.width,
            template.height
        );
        self.asset_kind = Some(kind);
        self.background = Some(image);
        self.touch();
        Ok(())
    }

    /// Load `kind`'s template for the selected team from `root` and
    /// install it. On failure the current background is kept.
    pub async fn load_background(&mut self, root: impl AsRef<Path>, kind: AssetKind) -> sigil_core::Result<()> {
        let Some(team) = self.team else {
            let err = Error::Export(ExportError::NoBackground);
            self.notify(NoticeLevel::Warning, err.notice_text());
            return Err(err);
        };
        let result = load_template(root, &team, kind, &self.config.files).await;
        let loaded = result.and_then(|image| self.set_background(kind, image).map_err(Error::from));
        if let Err(e) = &loaded {
            self.report(e);
        }
        loaded
    }

    pub fn set_background_type(&mut self, kind: BackgroundType) {
        self.settings.kind = if self.asset_kind.is_some_and(AssetKind::is_sticker) {
            kind
        } else {
            BackgroundType::Original
        };
        self.touch();
    }

    /// Set one background color from user input. Anything other than
    /// `#RGB`/`#RRGGBB` becomes white.
    pub fn set_background_color(&mut self, slot: ColorSlot, hex: &str) {
        self.settings.set_color(slot, Color::user_or_white(hex));
        self.touch();
    }

    pub fn set_gradient_direction(&mut self, direction: GradientDirection) {
        self.settings.gradient_direction = direction;
        self.touch();
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    /// Arm the capture engine on a surface the size of the composite.
    pub fn start_drawing(&mut self) -> bool {
        let (w, h) = self.surface_size();
        self.controller.end();
        match self.capture.begin(w, h, self.brush) {
            Ok(()) => {
                self.box_visible = false;
                true
            }
            Err(e) => {
                self.report(&e.into());
                false
            }
        }
    }

    pub fn draw_start(&mut self, x: f64, y: f64) -> bool {
        self.capture.stroke_start(x, y)
    }

    pub fn draw_move(&mut self, x: f64, y: f64) -> bool {
        self.capture.stroke_move(x, y)
    }

    pub fn draw_end(&mut self) {
        self.capture.stroke_end();
    }

    /// Change brush size and color. An invalid color falls back to the
    /// configured default.
    pub fn update_brush(&mut self, size: f32, color_hex: &str) {
        let color = Color::from_user_hex(color_hex).unwrap_or(self.config.drawing.default_color);
        self.brush.size = self.config.drawing.clamp_brush_size(size);
        self.brush.color = color;
        self.capture.update_brush(self.brush.size, color);
    }

    pub fn set_brush_outline(&mut self, width: f32, color_hex: &str) {
        let color = Color::user_or_white(color_hex);
        self.capture.set_outline(width, color);
        self.brush.stroke_width = self.capture.brush().stroke_width;
        self.brush.stroke_color = color;
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    /// Finish drawing and adopt the result as the signature, placed where
    /// it was drawn. Returns `false` when nothing was drawn.
    pub fn finish_drawing(&mut self) -> bool {
        match self.capture.finish() {
            Some(CapturedSignature { image, bounds }) => {
                let asset = SignatureAsset::new(image, SignatureOrigin::Drawn);
                self.set_signature(asset, Placement::At(bounds.x as f64, bounds.y as f64));
                true
            }
            None => {
                self.notify(NoticeLevel::Info, "Nothing was drawn");
                false
            }
        }
    }

    pub fn cancel_drawing(&mut self) {
        self.capture.cancel();
        self.box_visible = self.signature.is_some();
    }

    // ─── Signature ───────────────────────────────────────────────────────

    /// Validate an upload and adopt its decoded image, centered.
    pub fn accept_upload(&mut self, candidate: &UploadCandidate, image: Raster) -> sigil_core::Result<()> {
        if let Err(e) = candidate.validate(&self.config.files) {
            let err = Error::from(e);
            self.report(&err);
            return Err(err);
        }
        self.set_signature(SignatureAsset::new(image, SignatureOrigin::Uploaded), Placement::Centered);
        Ok(())
    }

    /// Validate, decode off-thread with the load timeout, then adopt.
    /// Nothing changes unless every step succeeds.
    pub async fn upload(&mut self, candidate: &UploadCandidate, bytes: Vec<u8>) -> sigil_core::Result<()> {
        if let Err(e) = candidate.validate(&self.config.files) {
            let err = Error::from(e);
            self.report(&err);
            return Err(err);
        }
        match load_image(bytes, ImagePolicy::from(&self.config.files)).await {
            Ok(image) => self.accept_upload(candidate, image),
            Err(e) => {
                let err = Error::from(e);
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Replace the live signature. Scale, rotation and opacity carry over;
    /// only the position is set.
    pub fn set_signature(&mut self, asset: SignatureAsset, placement: Placement) {
        let (x, y) = match placement {
            Placement::At(x, y) => (x, y),
            Placement::Centered => {
                let (w, h) = self.surface_size();
                (
                    (w as f64 - asset.width() as f64) / 2.0,
                    (h as f64 - asset.height() as f64) / 2.0,
                )
            }
        };
        log::debug!("signature {:?} at ({}, {})", asset, x, y);
        self.controller.end();
        self.signature = Some(asset);
        self.transform = self.transform.at(x, y);
        self.box_visible = true;
        self.notify(NoticeLevel::Success, "Signature added successfully");
        self.touch();
    }

    /// Remove the signature. The transform value is kept.
    pub fn delete_signature(&mut self) -> bool {
        self.controller.end();
        self.box_visible = false;
        let removed = self.signature.take().is_some();
        if removed {
            self.notify(NoticeLevel::Info, "Signature deleted");
            self.touch();
        }
        removed
    }

    /// Hide the selection box.
    pub fn finish_editing(&mut self) {
        self.controller.end();
        self.box_visible = false;
    }

    /// Selection outline geometry, while a signature is shown.
    pub fn signature_box(&self) -> Option<SignatureBox> {
        let asset = self.signature.as_ref()?;
        self.box_visible
            .then(|| signature_box(&self.transform, asset.dims()))
    }

    // ─── Transform ───────────────────────────────────────────────────────

    /// Begin a drag when `(x, y)` hits the signature box body, or a handle
    /// session when it hits a handle.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let Some(asset) = self.signature.as_ref() else {
            return false;
        };
        let b = signature_box(&self.transform, asset.dims());
        match hit_test(&b, Point::new(x, y), self.box_visible) {
            Some(Hit::Handle(handle)) => self.handle_down(handle, x, y),
            Some(Hit::Body) => {
                self.controller.start_drag(Point::new(x, y), self.transform);
                self.box_visible = true;
                true
            }
            None => false,
        }
    }

    pub fn handle_down(&mut self, handle: Handle, x: f64, y: f64) -> bool {
        let Some(asset) = self.signature.as_ref() else {
            return false;
        };
        self.controller
            .start_handle_transform(handle, Point::new(x, y), self.transform, asset.dims());
        true
    }

    /// Feed a pointer sample to the active gesture. Returns whether the
    /// transform changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        match self.controller.pointer_move(Point::new(x, y)) {
            Some(t) => {
                log::trace!("transform {:?}", t);
                self.transform = t;
                self.render_dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        if self.controller.is_active() {
            self.controller.end();
            self.save_dirty = true;
        }
    }

    /// Route a normalized input event. While drawing, pointer events go
    /// to the capture engine instead of the transform controller.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y } if self.is_drawing() => self.draw_start(*x, *y),
            InputEvent::PointerMove { x, y } if self.is_drawing() => self.draw_move(*x, *y),
            InputEvent::PointerUp if self.is_drawing() => {
                self.draw_end();
                true
            }
            InputEvent::PointerDown { x, y } => self.pointer_down(*x, *y),
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            InputEvent::PointerUp => {
                let active = self.controller.is_active();
                self.pointer_up();
                active
            }
            InputEvent::Key { key, ctrl, meta } => self.handle_key(key, *ctrl, *meta).is_some(),
        }
    }

    /// Apply a slider value. `scale` and `opacity` are clamped to their
    /// limits, `rotation` to the slider range; `x`/`y` are free.
    pub fn set_transform_field(&mut self, field: TransformField, value: f64, multiplier: f64) {
        let v = value * multiplier;
        if !v.is_finite() {
            log::warn!("ignoring non-finite {:?} value", field);
            return;
        }
        let limits = self.config.limits;
        let t = self.transform;
        self.transform = match field {
            TransformField::X => Transform { x: v, ..t },
            TransformField::Y => Transform { y: v, ..t },
            TransformField::Scale => t.with_scale(v, &limits),
            TransformField::Rotation => t.with_rotation(limits.clamp_rotation(v)),
            TransformField::Opacity => t.with_opacity(v, &limits),
        };
        self.touch();
    }

    pub fn reset_transform(&mut self) {
        self.transform = Transform::default();
        self.touch();
    }

    // ─── Output ──────────────────────────────────────────────────────────

    fn scene(&self) -> Scene<'_> {
        scene_of(
            self.background.as_ref(),
            self.asset_kind,
            &self.settings,
            self.signature.as_ref(),
            &self.transform,
        )
    }

    /// Paint the composite at the current surface size. The signature is
    /// shown even before a template is chosen.
    pub fn render(&mut self) -> Option<&Raster> {
        let (w, h) = self.surface_size();
        let sized = match self.compositor.take() {
            Some(mut c) => c.resize(w, h).map(|()| c),
            None => Compositor::new(w, h),
        };
        match sized {
            Ok(c) => self.compositor = Some(c),
            Err(e) => {
                self.report(&e.into());
                return None;
            }
        }

        let Self {
            compositor,
            background,
            asset_kind,
            settings,
            signature,
            transform,
            ..
        } = self;
        let scene = scene_of(background.as_ref(), *asset_kind, settings, signature.as_ref(), transform);
        compositor.as_mut().map(|c| c.render(&scene))
    }

    /// Export the composite as PNG. `date` is `YYYY-MM-DD`.
    pub fn export(&mut self, date: &str) -> sigil_core::Result<ExportedImage> {
        let (Some(team), Some(kind), true) = (self.team, self.asset_kind, self.background.is_some()) else {
            let err = Error::Export(ExportError::NoBackground);
            self.notify(NoticeLevel::Warning, err.notice_text());
            return Err(err);
        };
        let (w, h) = self.surface_size();
        let filename = export_filename(&team, kind, date, "png");
        let result = export_png(&self.scene(), w, h, filename);
        match result {
            Ok(image) => {
                self.notify(NoticeLevel::Success, "Image exported successfully!");
                Ok(image)
            }
            Err(e) => {
                let err = Error::from(e);
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Resolve and apply a shortcut. `Export` needs a date, so it is only
    /// returned for the host to finish with [`export`](Self::export).
    pub fn handle_key(&mut self, key: &str, ctrl: bool, meta: bool) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(key, ctrl, meta)?;
        match action {
            ShortcutAction::DeleteSignature => {
                if !self.delete_signature() {
                    return None;
                }
            }
            ShortcutAction::Export => {}
        }
        Some(action)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn saved_state(&self) -> SavedState {
        SavedState {
            team_prefix: self.team.map(|t| t.prefix.to_string()),
            team_name: self.team.map(|t| t.name.to_string()),
            asset: self.asset_kind.map(|k| k.key().to_string()),
            transform: self.transform,
            background_settings: self.settings,
        }
    }

    /// Apply a saved state after sanitizing it. Returns the asset kind
    /// whose template the host should load next, if any.
    pub fn restore(&mut self, state: SavedState) -> Option<AssetKind> {
        let state = state.sanitized(&self.config.limits);
        self.controller.end();
        self.team = state.team_prefix.as_deref().and_then(team_by_prefix);
        self.asset_kind = None;
        self.background = None;
        self.transform = state.transform;
        self.settings = state.background_settings;
        self.render_dirty = true;
        log::debug!("restored state for {:?}", state.team_prefix);
        self.team.and(state.asset_kind())
    }
}

fn scene_of<'a>(
    background: Option<&'a Raster>,
    asset_kind: Option<AssetKind>,
    settings: &'a BackgroundSettings,
    signature: Option<&'a SignatureAsset>,
    transform: &'a Transform,
) -> Scene<'a> {
    Scene {
        background,
        asset_kind,
        settings,
        signature: signature.map(|s| (s.image(), transform)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sigil_render::raster::new_surface;

    fn blank(w: u32, h: u32) -> Raster {
        new_surface(w, h).unwrap()
    }

    #[test]
    fn unknown_team_clears_selection() {
        let mut s = CompositionSession::default();
        assert!(s.select_team("ATL").is_some());
        s.set_background(AssetKind::Sticker, blank(4, 4)).unwrap();
        assert!(s.select_team("").is_none());
        assert_eq!(s.asset_kind(), None);
        assert!(s.background().is_none());
    }

    #[test]
    fn non_sticker_forces_original_background() {
        let mut s = CompositionSession::default();
        s.set_background(AssetKind::Sticker, blank(4, 4)).unwrap();
        s.set_background_type(BackgroundType::Gradient);
        assert_eq!(s.background_settings().kind, BackgroundType::Gradient);

        s.set_background(AssetKind::DiscordBanner, blank(4, 4)).unwrap();
        assert_eq!(s.background_settings().kind, BackgroundType::Original);
        s.set_background_type(BackgroundType::Solid);
        assert_eq!(s.background_settings().kind, BackgroundType::Original);
        assert_eq!(s.surface_size(), (1200, 480));
    }

    #[test]
    fn invalid_colors_become_white() {
        let mut s = CompositionSession::default();
        s.set_background_color(ColorSlot::Solid, "red");
        assert_eq!(s.background_settings().solid_color, Color::WHITE);
        s.set_background_color(ColorSlot::Gradient2, "#0f0");
        assert_eq!(s.background_settings().gradient_color2.to_hex(), "#00ff00");
    }

    #[test]
    fn uploads_are_centered() {
        let mut s = CompositionSession::default();
        s.set_background(AssetKind::TwitterBanner, blank(4, 4)).unwrap();
        let candidate = UploadCandidate::new("sig.png", "image/png", 1000);
        s.accept_upload(&candidate, blank(100, 50)).unwrap();
        assert_eq!((s.transform().x, s.transform().y), (700.0, 225.0));
        assert_eq!(s.signature().unwrap().origin(), SignatureOrigin::Uploaded);
    }

    #[test]
    fn rejected_upload_leaves_state_alone() {
        let mut s = CompositionSession::default();
        let candidate = UploadCandidate::new("sig.tiff", "image/png", 1000);
        assert!(s.accept_upload(&candidate, blank(10, 10)).is_err());
        assert!(s.signature().is_none());
        assert_eq!(
            s.take_notices(),
            vec![Notice {
                level: NoticeLevel::Error,
                message: "Invalid file extension".into()
            }]
        );
    }

    #[test]
    fn slider_fields_are_clamped() {
        let mut s = CompositionSession::default();
        s.set_transform_field(TransformField::Scale, 900.0, 0.01);
        assert_eq!(s.transform().scale, 5.0);
        s.set_transform_field(TransformField::Rotation, 270.0, 1.0);
        assert_eq!(s.transform().rotation, 180.0);
        s.set_transform_field(TransformField::Opacity, 50.0, 0.01);
        assert_eq!(s.transform().opacity, 0.5);
        s.set_transform_field(TransformField::X, -40.0, 1.0);
        assert_eq!(s.transform().x, -40.0);
    }

    #[test]
    fn delete_keeps_transform() {
        let mut s = CompositionSession::default();
        s.set_signature(SignatureAsset::new(blank(10, 10), SignatureOrigin::Drawn), Placement::At(5.0, 6.0));
        assert!(s.signature_box().is_some());
        assert_eq!(s.handle_key("Delete", false, false), Some(ShortcutAction::DeleteSignature));
        assert!(s.signature().is_none());
        assert!(s.signature_box().is_none());
        assert_eq!((s.transform().x, s.transform().y), (5.0, 6.0));
        assert_eq!(s.handle_key("Delete", false, false), None);
    }

    #[test]
    fn render_follows_surface_size() {
        let mut s = CompositionSession::default();
        let canvas = s.render().unwrap();
        assert_eq!((canvas.width(), canvas.height()), DEFAULT_SURFACE);
        s.set_background(AssetKind::TwitchBanner, blank(4, 4)).unwrap();
        let canvas = s.render().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1920, 480));
        s.select_team("");
        let canvas = s.render().unwrap();
        assert_eq!((canvas.width(), canvas.height()), DEFAULT_SURFACE);
    }

    #[test]
    fn restore_sanitizes_and_requests_template() {
        let mut s = CompositionSession::default();
        let state = SavedState {
            team_prefix: Some("HR".into()),
            asset: Some("Sticker".into()),
            transform: Transform {
                scale: 9.0,
                ..Transform::default()
            },
            ..SavedState::default()
        };
        assert_eq!(s.restore(state), Some(AssetKind::Sticker));
        assert_eq!(s.team().map(|t| t.prefix), Some("HR"));
        assert_eq!(s.transform().scale, 5.0);
    }
}
