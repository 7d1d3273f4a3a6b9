//! Scripted session replay.
//!
//! A session file is a JSON list of UI steps, either bare or wrapped in an
//! object with a `name`:
//!
//! ```json
//! [
//!   { "action": "select_material", "material": "timber" },
//!   { "action": "pointer_down", "x": 0, "y": 0 },
//!   { "action": "pointer_up", "x": 100, "y": 100 }
//! ]
//! ```
//!
//! Steps are applied in order to a [`TakeoffCanvas`]. A failing step is
//! logged and counted; replay always runs to the end.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use takeoffkit_core::Material;
use takeoffkit_designer::{BackgroundAsset, PointerEvent, ShapeType, TakeoffCanvas};

/// One scripted UI action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionStep {
    SelectTool { shape: ShapeType },
    SelectMaterial { material: Material },
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    DoubleClick(PointerEvent),
    Wheel { delta_y: f64, x: f64, y: f64 },
    ZoomIn,
    ZoomOut,
    ZoomToFit,
    FitToContent,
    AddRoom {
        #[serde(default)]
        name: Option<String>,
    },
    RenameRoom { room: u64, name: String },
    SetRoomMaterial { room: u64, material: Material },
    MoveRoom { room: u64, dx: f64, dy: f64 },
    ScaleRoom { room: u64, scale_x: f64, scale_y: f64 },
    DeleteRoom { room: u64 },
    SelectRoom { room: u64 },
    DeselectAll,
    /// Path is resolved against the session file's directory.
    LoadBackground { path: PathBuf },
    RemoveBackground,
    SetBackgroundOpacity { opacity: f64 },
    ToggleGrid,
    Clear,
}

impl SessionStep {
    fn label(&self) -> &'static str {
        match self {
            Self::SelectTool { .. } => "select_tool",
            Self::SelectMaterial { .. } => "select_material",
            Self::PointerDown(_) => "pointer_down",
            Self::PointerMove(_) => "pointer_move",
            Self::PointerUp(_) => "pointer_up",
            Self::DoubleClick(_) => "double_click",
            Self::Wheel { .. } => "wheel",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::ZoomToFit => "zoom_to_fit",
            Self::FitToContent => "fit_to_content",
            Self::AddRoom { .. } => "add_room",
            Self::RenameRoom { .. } => "rename_room",
            Self::SetRoomMaterial { .. } => "set_room_material",
            Self::MoveRoom { .. } => "move_room",
            Self::ScaleRoom { .. } => "scale_room",
            Self::DeleteRoom { .. } => "delete_room",
            Self::SelectRoom { .. } => "select_room",
            Self::DeselectAll => "deselect_all",
            Self::LoadBackground { .. } => "load_background",
            Self::RemoveBackground => "remove_background",
            Self::SetBackgroundOpacity { .. } => "set_background_opacity",
            Self::ToggleGrid => "toggle_grid",
            Self::Clear => "clear",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SessionFile {
    Steps(Vec<SessionStep>),
    Named {
        #[serde(default)]
        name: Option<String>,
        steps: Vec<SessionStep>,
    },
}

/// A parsed session script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub name: Option<String>,
    pub steps: Vec<SessionStep>,
    /// Directory background paths are resolved against.
    pub base_dir: PathBuf,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub steps_applied: usize,
    /// `(step index, message)` for each step that failed.
    pub failures: Vec<(usize, String)>,
    /// Rooms-change notifications observed during the replay.
    pub notifications: usize,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Session {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let file: SessionFile = serde_json::from_str(json).context("invalid session script")?;
        let (name, steps) = match file {
            SessionFile::Steps(steps) => (None, steps),
            SessionFile::Named { name, steps } => (name, steps),
        };
        Ok(Self {
            name,
            steps,
            base_dir: PathBuf::from("."),
        })
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read session {}", path.display()))?;
        let mut session = Self::from_json(&json)
            .with_context(|| format!("failed to parse session {}", path.display()))?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            session.base_dir = dir.to_path_buf();
        }
        tracing::info!(
            "Loaded session {} ({} steps)",
            path.display(),
            session.steps.len()
        );
        Ok(session)
    }

    /// Apply every step to `canvas`.
    pub async fn replay(&self, canvas: &mut TakeoffCanvas) -> ReplayReport {
        let notifications = Rc::new(Cell::new(0usize));
        let counter = notifications.clone();
        let subscription = canvas.on_rooms_change(move |_| counter.set(counter.get() + 1));

        let mut report = ReplayReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            match self.apply(canvas, step).await {
                Ok(()) => report.steps_applied += 1,
                Err(e) => {
                    tracing::warn!("Step {} ({}) failed: {:#}", index, step.label(), e);
                    report.failures.push((index, format!("{:#}", e)));
                }
            }
        }

        canvas.off_rooms_change(subscription);
        report.notifications = notifications.get();
        report
    }

    async fn apply(&self, canvas: &mut TakeoffCanvas, step: &SessionStep) -> anyhow::Result<()> {
        tracing::debug!("Replaying {}", step.label());
        match step {
            SessionStep::SelectTool { shape } => canvas.set_current_shape(*shape),
            SessionStep::SelectMaterial { material } => canvas.set_selected_material(*material),
            SessionStep::PointerDown(event) => canvas.pointer_down(*event),
            SessionStep::PointerMove(event) => canvas.pointer_move(*event),
            SessionStep::PointerUp(event) => canvas.pointer_up(*event),
            SessionStep::DoubleClick(event) => canvas.double_click(*event),
            SessionStep::Wheel { delta_y, x, y } => {
                canvas.wheel(*delta_y, *x, *y);
            }
            SessionStep::ZoomIn => canvas.zoom_in(),
            SessionStep::ZoomOut => canvas.zoom_out(),
            SessionStep::ZoomToFit => canvas.zoom_to_fit(),
            SessionStep::FitToContent => canvas.fit_to_content(),
            SessionStep::AddRoom { name } => {
                canvas.add_room(name.as_deref())?;
            }
            SessionStep::RenameRoom { room, name } => {
                canvas.update_room_name(*room, name)?;
            }
            SessionStep::SetRoomMaterial { room, material } => {
                canvas.update_room_material(*room, *material)?;
            }
            SessionStep::MoveRoom { room, dx, dy } => {
                canvas.move_room(*room, *dx, *dy)?;
            }
            SessionStep::ScaleRoom {
                room,
                scale_x,
                scale_y,
            } => {
                canvas.scale_room(*room, *scale_x, *scale_y)?;
            }
            SessionStep::DeleteRoom { room } => {
                canvas.delete_room(*room)?;
            }
            SessionStep::SelectRoom { room } => canvas.select_room(*room)?,
            SessionStep::DeselectAll => canvas.deselect_all(),
            SessionStep::LoadBackground { path } => {
                let full = self.base_dir.join(path);
                let asset = BackgroundAsset::from_file(&full)
                    .await
                    .with_context(|| format!("failed to read background {}", full.display()))?;
                canvas.load_background_image(asset).await?;
            }
            SessionStep::RemoveBackground => {
                canvas.remove_background_image();
            }
            SessionStep::SetBackgroundOpacity { opacity } => {
                canvas.set_background_opacity(*opacity);
            }
            SessionStep::ToggleGrid => {
                canvas.toggle_grid();
            }
            SessionStep::Clear => canvas.clear_canvas()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoffkit_designer::CanvasOptions;

    #[test]
    fn test_parse_bare_list() {
        let session = Session::from_json(
            r#"[
                {"action": "select_tool", "shape": "circle"},
                {"action": "pointer_down", "x": 10, "y": 20, "button": "middle"},
                {"action": "zoom_in"}
            ]"#,
        )
        .unwrap();
        assert_eq!(session.steps.len(), 3);
        assert_eq!(
            session.steps[0],
            SessionStep::SelectTool {
                shape: ShapeType::Circle
            }
        );
        match &session.steps[1] {
            SessionStep::PointerDown(event) => {
                assert_eq!((event.x, event.y), (10.0, 20.0));
                assert_eq!(event.click_count, 1);
            }
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_parse_named_session() {
        let session =
            Session::from_json(r#"{"name": "ground floor", "steps": [{"action": "clear"}]}"#)
                .unwrap();
        assert_eq!(session.name.as_deref(), Some("ground floor"));
        assert_eq!(session.steps, vec![SessionStep::Clear]);
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(Session::from_json(r#"[{"action": "explode"}]"#).is_err());
    }

    #[tokio::test]
    async fn test_failed_step_does_not_stop_replay() {
        let session = Session {
            steps: vec![
                SessionStep::DeleteRoom { room: 42 },
                SessionStep::AddRoom { name: None },
            ],
            ..Session::default()
        };
        let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
        let report = session.replay(&mut canvas).await;
        assert_eq!(report.steps_applied, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, 0);
        assert_eq!(report.notifications, 1);
        assert_eq!(canvas.rooms().len(), 1);
    }
}
