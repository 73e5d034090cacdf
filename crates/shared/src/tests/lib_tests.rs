use crate::{
    domain::{MediaKind, Part, PartId, TourStage, View},
    protocol::TourCommand,
};

fn part(front: bool, back: bool) -> Part {
    let position = crate::domain::HotspotPosition { x: 40.0, y: 60.0 };
    Part {
        id: PartId(7),
        name: "Joystick".into(),
        description: None,
        front_position: front.then_some(position),
        back_position: back.then_some(position),
        specs: Vec::new(),
        safety_note: None,
        media: None,
    }
}

#[test]
fn part_visibility_follows_view_positions() {
    let front_only = part(true, false);
    assert!(front_only.is_visible_in(View::Front));
    assert!(!front_only.is_visible_in(View::Back));
}

#[test]
fn missing_media_falls_back_to_placeholder_image() {
    let media = part(true, true).media_or_placeholder();
    assert_eq!(media.kind, MediaKind::Image);
    assert!(media.src.contains("placeholder"));
}

#[test]
fn only_walk_stages_have_a_hotspot_view() {
    assert_eq!(TourStage::FrontHotspots.hotspot_view(), Some(View::Front));
    assert_eq!(TourStage::BackHotspots.hotspot_view(), Some(View::Back));
    assert!(!TourStage::SwitchingToBack.is_hotspot_walk());
    assert!(!TourStage::Stopped.is_hotspot_walk());
}

#[test]
fn tour_command_uses_tagged_wire_format() {
    let cmd: TourCommand =
        serde_json::from_str(r#"{"type":"part_clicked","payload":{"part_id":3}}"#)
            .expect("decode");
    assert_eq!(cmd, TourCommand::PartClicked { part_id: PartId(3) });

    let stop: TourCommand = serde_json::from_str(r#"{"type":"stop"}"#).expect("decode stop");
    assert_eq!(stop, TourCommand::Stop);
}
