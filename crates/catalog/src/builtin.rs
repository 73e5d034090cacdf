use shared::domain::{
    FeatureCard, HotspotPosition, MediaDescriptor, MediaKind, Part, PartId, Slide, SpecEntry,
};

use crate::Catalog;

fn at(x: f32, y: f32) -> Option<HotspotPosition> {
    Some(HotspotPosition { x, y })
}

fn spec(label: &str, value: &str) -> SpecEntry {
    SpecEntry {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn image(src: &str) -> Option<MediaDescriptor> {
    Some(MediaDescriptor {
        kind: MediaKind::Image,
        src: src.to_string(),
        poster: None,
    })
}

fn video(src: &str, poster: &str) -> Option<MediaDescriptor> {
    Some(MediaDescriptor {
        kind: MediaKind::Video,
        src: src.to_string(),
        poster: Some(poster.to_string()),
    })
}

fn slide(n: u8, alt: &str) -> Slide {
    Slide {
        src: format!("/assets/images/Caterwil{n}.jpg"),
        alt: alt.to_string(),
    }
}

pub(crate) fn caterwil_gts_4wd() -> Catalog {
    let parts = vec![
        Part {
            id: PartId(1),
            name: "Joystick Controller".into(),
            description: Some(
                "Proportional joystick with speed selector and horn. Switches between road \
                 and stair modes with a single press."
                    .into(),
            ),
            front_position: at(72.0, 41.0),
            back_position: None,
            specs: vec![
                spec("Speed levels", "5"),
                spec("Mount", "Left or right armrest"),
            ],
            safety_note: None,
            media: image("/assets/images/parts/joystick.jpg"),
        },
        Part {
            id: PartId(2),
            name: "Rubber Tracks".into(),
            description: Some(
                "Twin rubber tracks fold down for stairs, kerbs and loose ground while the \
                 chair keeps the occupant level."
                    .into(),
            ),
            front_position: at(50.0, 86.0),
            back_position: at(48.0, 88.0),
            specs: vec![
                spec("Max stair angle", "35°"),
                spec("Climbing speed", "Up to 15 steps per minute"),
            ],
            safety_note: Some(
                "Always climb with the backrest facing up the staircase.".into(),
            ),
            media: video(
                "/assets/videos/stair-climb.mp4",
                "/assets/videos/stair-climb-poster.jpg",
            ),
        },
        Part {
            id: PartId(3),
            name: "Front Drive Wheels".into(),
            description: Some(
                "All-wheel drive with independent motors gives traction on grass, gravel \
                 and wet pavement."
                    .into(),
            ),
            front_position: at(28.0, 78.0),
            back_position: None,
            specs: vec![spec("Diameter", "12 in"), spec("Drive", "4WD")],
            safety_note: None,
            media: image("/assets/images/parts/front-wheels.jpg"),
        },
        Part {
            id: PartId(4),
            name: "Seat Levelling System".into(),
            description: Some(
                "Gyroscopic sensors tilt the seat automatically so the occupant stays \
                 upright on slopes and stairs."
                    .into(),
            ),
            front_position: at(46.0, 48.0),
            back_position: at(52.0, 45.0),
            specs: vec![spec("Tilt range", "±30°")],
            safety_note: None,
            media: None,
        },
        Part {
            id: PartId(5),
            name: "Battery Pack".into(),
            description: Some(
                "Sealed lithium batteries under the seat power up to 30 km of travel or \
                 1000 stair steps per charge."
                    .into(),
            ),
            front_position: None,
            back_position: at(50.0, 64.0),
            specs: vec![
                spec("Voltage", "24 V"),
                spec("Charge time", "8 h"),
            ],
            safety_note: Some("Charge only with the supplied charger.".into()),
            media: image("/assets/images/parts/battery.jpg"),
        },
        Part {
            id: PartId(6),
            name: "Attendant Handles".into(),
            description: Some(
                "Fold-out handles let a companion guide the chair during stair descent.".into(),
            ),
            front_position: None,
            back_position: at(50.0, 22.0),
            specs: Vec::new(),
            safety_note: None,
            media: image("/assets/images/parts/handles.jpg"),
        },
        Part {
            id: PartId(7),
            name: "Rear Castors".into(),
            description: None,
            front_position: None,
            back_position: at(30.0, 82.0),
            specs: Vec::new(),
            safety_note: None,
            media: None,
        },
    ];

    let features = vec![
        FeatureCard {
            icon: "🪜".into(),
            title: "Stair Climbing".into(),
            description: "Climbs straight and spiral staircases without assistance.".into(),
        },
        FeatureCard {
            icon: "⚖️".into(),
            title: "Automatic Levelling".into(),
            description: "Keeps the seat horizontal on slopes up to 30 degrees.".into(),
        },
        FeatureCard {
            icon: "🚙".into(),
            title: "All-Terrain 4WD".into(),
            description: "Four independent motors for sand, snow and gravel.".into(),
        },
        FeatureCard {
            icon: "🔋".into(),
            title: "Long Range".into(),
            description: "Up to 30 km on a single overnight charge.".into(),
        },
        FeatureCard {
            icon: "🛡️".into(),
            title: "Safety First".into(),
            description: "Anti-tip sensors and an emergency stop on the armrest.".into(),
        },
    ];

    let slideshow = vec![
        slide(1, "Caterwil on a staircase"),
        slide(2, "Caterwil outdoors"),
        slide(3, "Caterwil with tracks lowered"),
        slide(4, "Caterwil seat levelling"),
        slide(5, "Caterwil at the kerb"),
    ];

    let gallery = vec![
        slide(2, "Wheelchair accessory 1"),
        slide(1, "Wheelchair accessory 2"),
        slide(4, "Wheelchair accessory 3"),
        slide(3, "Wheelchair accessory 4"),
        slide(5, "Wheelchair accessory 5"),
    ];

    Catalog {
        parts,
        features,
        slideshow,
        gallery,
    }
}
