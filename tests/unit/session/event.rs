use super::*;
use crate::generate::service::{GenerationService, ProceduralService};
use crate::scene::presets::Preset;

#[test]
fn events_parse_from_tagged_json() {
    let script = r#"[
        {"event": "apply_preset", "preset": "noir"},
        {"event": "edit", "path": "camera.yaw", "value": 45},
        {"event": "edit", "path": "render.hdr", "value": true},
        {"event": "generate"},
        {"event": "select_history_entry", "id": 1},
        {"event": "delete_keyframe", "id": 3},
        {"event": "set_blend_position", "position": 25.5},
        {"event": "exit_comparison"}
    ]"#;
    let events: Vec<StudioEvent> = serde_json::from_str(script).unwrap();
    assert_eq!(events.len(), 8);
    assert_eq!(
        events[1],
        StudioEvent::Edit {
            path: Field::CameraYaw,
            value: Scalar::Number(45.0)
        }
    );
    assert_eq!(
        events[4],
        StudioEvent::SelectHistoryEntry { id: EntryId(1) }
    );
    assert_eq!(
        events[6],
        StudioEvent::SetBlendPosition { position: 25.5 }
    );
}

#[test]
fn unknown_path_in_script_is_rejected() {
    let bad = r#"{"event": "edit", "path": "camera.zoom", "value": 2}"#;
    assert!(serde_json::from_str::<StudioEvent>(bad).is_err());
}

#[test]
fn handle_applies_synchronous_events() {
    let mut studio = Studio::default();
    studio
        .handle(StudioEvent::ApplyPreset {
            preset: "cyberpunk".into(),
        })
        .unwrap();
    studio
        .handle(StudioEvent::Edit {
            path: Field::CameraFov,
            value: Scalar::Number(30.0),
        })
        .unwrap();
    studio.handle(StudioEvent::AddKeyframe).unwrap();

    assert_eq!(studio.config().camera.fov, 30.0);
    assert_eq!(studio.config().lighting, Preset::Cyberpunk.config().lighting);
    assert_eq!(studio.keyframes().len(), 1);

    studio.handle(StudioEvent::Reset).unwrap();
    assert_eq!(studio.config(), &Preset::Studio.config());
}

#[test]
fn generate_hands_back_the_submission() {
    let mut studio = Studio::default();
    let Dispatched::Submitted(pending) = studio.handle(StudioEvent::Generate).unwrap() else {
        panic!("generate did not submit");
    };
    assert!(studio.is_loading());
    let result = ProceduralService { width: 16 }.generate(pending.request());
    assert!(studio.complete_generation(pending, result).is_success());

    studio
        .handle(StudioEvent::SetComparisonReference { id: EntryId(1) })
        .unwrap();
    studio
        .handle(StudioEvent::SetBlendPosition { position: 80.0 })
        .unwrap();
    assert_eq!(studio.comparison().unwrap().blend_position(), 80.0);
    studio.handle(StudioEvent::ClearHistory).unwrap();
    assert!(studio.history().is_empty());
}

#[test]
fn failing_events_report_errors() {
    let mut studio = Studio::default();
    assert!(
        studio
            .handle(StudioEvent::ApplyPreset {
                preset: "vaporwave".into()
            })
            .is_err()
    );
    assert!(
        studio
            .handle(StudioEvent::SelectKeyframe { id: KeyframeId(9) })
            .is_err()
    );
    assert!(matches!(
        studio
            .handle(StudioEvent::DeleteKeyframe { id: KeyframeId(9) })
            .unwrap(),
        Dispatched::Applied
    ));
}
