//! Tests for SceneLayout presets, JSON и генерации targets.

use bevy::prelude::*;

use super::*;
use crate::components::TargetKind;

#[test]
fn test_presets_are_valid() {
    for layout in [SceneLayout::lounge(), SceneLayout::nightclub()] {
        assert!(layout.validate().is_ok(), "preset {} невалиден", layout.name);
    }
}

#[test]
fn test_preset_lookup() {
    assert_eq!(SceneLayout::preset("Lounge").map(|l| l.name), Some("lounge".to_string()));
    assert_eq!(
        SceneLayout::preset(" nightclub ").map(|l| l.name),
        Some("nightclub".to_string())
    );
    assert!(SceneLayout::preset("warehouse").is_none());
}

#[test]
fn test_lounge_targets_are_zones_only() {
    let layout = SceneLayout::lounge();
    let targets = layout.targets();

    assert_eq!(targets.len(), 6);
    assert!(targets.iter().all(|(t, _)| t.kind == TargetKind::Zone));
    assert_eq!(targets[1].1, Vec3::new(2.0, 0.1, -2.0));
    assert_eq!(targets[1].0.size, Vec3::new(3.0, 0.2, 2.0));
    assert_eq!(layout.navigator.speed, 0.08);
    assert_eq!(layout.navigator.hover_height, 2.0);
    assert_eq!(layout.navigator.look_target, layout.booth.position);
}

#[test]
fn test_nightclub_booth_is_landmark() {
    let layout = SceneLayout::nightclub();
    let targets = layout.targets();

    assert_eq!(targets.len(), 8);
    let (booth, position) = targets.last().unwrap();
    assert!(booth.is_landmark());
    assert_eq!(booth.id.0, 7);
    assert_eq!(*position, Vec3::new(1.93, 0.75, -6.0));
    assert_eq!(layout.navigator.speed, 0.05);
    assert_eq!(layout.navigator.hover_height, 5.0);
}

#[test]
fn test_nightclub_furniture_generation() {
    let layout = SceneLayout::nightclub();
    let pieces = layout.furniture_pieces();

    // 7 plates × (1 стол + 4 дивана)
    assert_eq!(pieces.len(), 35);
    assert_eq!(
        pieces[0],
        FurniturePiece::Table { position: Vec3::new(1.93, 1.2, -12.925) }
    );
    match pieces[1] {
        FurniturePiece::Sofa { position, yaw } => {
            assert!((position.x - 3.13).abs() < 1e-5);
            assert_eq!(position.y, 1.0);
            assert!((yaw - std::f32::consts::FRAC_PI_6).abs() < 1e-6);
        }
        other => panic!("ожидали Sofa, получили {:?}", other),
    }

    assert!(SceneLayout::lounge().furniture_pieces().is_empty());
}

#[test]
fn test_nightclub_furniture_materials() {
    let furniture = SceneLayout::nightclub().furniture.unwrap();

    assert_eq!((furniture.table_color, furniture.table_metalness, furniture.table_roughness), (0xdddddd, 0.5, 0.3));
    assert_eq!((furniture.sofa_color, furniture.sofa_metalness, furniture.sofa_roughness), (0x292929, 0.4, 0.5));
}

#[test]
fn test_json_roundtrip() {
    let layout = SceneLayout::nightclub();
    let json = layout.to_json_pretty().unwrap();
    let parsed = SceneLayout::from_json_str(&json).unwrap();
    assert_eq!(parsed, layout);
}

#[test]
fn test_json_rejects_invalid_navigator() {
    let mut layout = SceneLayout::lounge();
    layout.navigator.speed = 1.5;
    let json = serde_json::to_string(&layout).unwrap();

    let err = SceneLayout::from_json_str(&json).unwrap_err();
    assert!(matches!(err, NavigationError::InvalidConfig { field: "speed", .. }));
}

#[test]
fn test_json_rejects_garbage() {
    let err = SceneLayout::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, NavigationError::LayoutParse(_)));
}

#[test]
fn test_load_missing_file() {
    let err = SceneLayout::load("/definitely/not/here.layout.json").unwrap_err();
    assert!(matches!(err, NavigationError::LayoutIo { .. }));
    assert!(SceneLayout::resolve("/definitely/not/here.layout.json").is_err());
}

#[test]
fn test_validate_rejects_bad_geometry() {
    let mut layout = SceneLayout::lounge();
    layout.zones[0].size = Vec3::new(2.0, 0.0, 2.0);
    assert!(layout.validate().is_err());

    let mut layout = SceneLayout::lounge();
    layout.camera.near = 0.0;
    assert!(layout.validate().is_err());

    let mut layout = SceneLayout::lounge();
    layout.zones[2].opacity = 1.2;
    assert!(layout.validate().is_err());
}

#[test]
fn test_camera_rig_from_spec() {
    let rig = SceneLayout::lounge().camera.rig(2.0);
    assert!((rig.fov_y - 75.0_f32.to_radians()).abs() < 1e-6);
    assert_eq!(rig.aspect, 2.0);
    assert_eq!(rig.near, 0.1);
}

