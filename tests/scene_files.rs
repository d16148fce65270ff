//! Scene file loading and the built-in cottage

use cottage::scene::SceneBuilder;
use cottage_core::{Scene, World};

#[test]
fn test_bundled_house_scene_loads() {
    let scene = Scene::load("scenes/house.ron").unwrap();
    assert_eq!(scene.name, "house");
    assert!(scene.camera_start.is_none());
    assert!(scene.lighting.is_none());
    assert!(scene.model.is_none());

    let world = scene.instantiate();
    assert_eq!(world.entity_count(), 7);
    let (_, window) = world.get_by_name("window").unwrap();
    assert!(window.material.is_transparent());
    assert_eq!(world.get_by_tag("fence").count(), 0);
}

#[test]
fn test_bundled_house_matches_builder() {
    let from_file = Scene::load("scenes/house.ron").unwrap().instantiate();
    let built = SceneBuilder::cottage().build();

    for name in ["walls", "roof", "door", "window", "chimney", "floor", "grass"] {
        let (_, a) = from_file.get_by_name(name).unwrap();
        let (_, b) = built.get_by_name(name).unwrap();
        assert_eq!(a.transform.position, b.transform.position, "{}", name);
        assert_eq!(a.mesh.triangle_count(), b.mesh.triangle_count(), "{}", name);
    }
}

#[test]
fn test_cottage_survives_save_and_load() {
    let path = std::env::temp_dir().join(format!("cottage_scene_{}.ron", std::process::id()));
    SceneBuilder::cottage().into_scene().save(&path).unwrap();

    let loaded = Scene::load(&path);
    let _ = std::fs::remove_file(&path);
    let world: World = loaded.unwrap().instantiate();

    assert_eq!(world.entity_count(), 64);
    assert_eq!(world.get_by_tag("fence").count(), 54);
    assert_eq!(world.triangle_count(), SceneBuilder::cottage().build().triangle_count());
}

#[test]
fn test_missing_scene_file_is_an_error() {
    assert!(Scene::load("scenes/does_not_exist.ron").is_err());
}
