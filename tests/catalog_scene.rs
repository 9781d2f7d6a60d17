use std::path::PathBuf;

use orrery::config::{BodyKind, load_bodies, load_scene};
use orrery::core::vector;
use orrery::ephem::{Ephemeris, MeanElementsEphemeris, SampledEphemeris, parse_epoch};
use orrery::scene::SceneState;

fn config_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join(name)
}

fn bundled_scene() -> SceneState {
    let bodies = load_bodies(config_path("bodies.yaml")).expect("catalog");
    let scene = load_scene(config_path("scene.toml")).expect("scene");
    SceneState::build(&bodies, &scene, &MeanElementsEphemeris::new()).expect("scene builds")
}

#[test]
fn bundled_catalog_orbits_are_valid() {
    let bodies = load_bodies(config_path("bodies.yaml")).expect("catalog");
    let ephemeris = MeanElementsEphemeris::new();
    assert!(bodies.iter().any(|b| b.kind == BodyKind::Comet));
    for body in &bodies {
        let orbit = body.orbit(&ephemeris).expect("valid orbit");
        assert_eq!(orbit.is_none(), body.kind == BodyKind::Star, "{}", body.name);
    }
}

#[test]
fn catalog_agrees_with_mean_elements_at_j2000() {
    let bodies = load_bodies(config_path("bodies.yaml")).expect("catalog");
    let ephemeris = MeanElementsEphemeris::new();
    let jd = parse_epoch("J2000").expect("epoch");
    for name in ["MERCURY", "VENUS", "EARTH", "MARS", "JUPITER", "SATURN"] {
        let body = bodies.iter().find(|b| b.name == name).expect("body in catalog");
        let from_catalog = body
            .orbit(&ephemeris)
            .expect("orbit")
            .expect("planet has an orbit")
            .position_at(jd);
        let from_table = ephemeris.position(name, jd).expect("table position");
        let gap = vector::distance(&from_catalog, &from_table);
        assert!(gap < 1e-3 * vector::norm(&from_table), "{}: gap = {}", name, gap);
    }
}

#[test]
fn bundled_scene_places_everything() {
    let mut scene = bundled_scene();
    assert_eq!(scene.camera.target(), Some("EARTH"));
    let sun = scene.body("SUN").expect("sun");
    assert_eq!(sun.world_position, [0.0; 3]);

    // Parents always precede their children.
    for (i, body) in scene.bodies().iter().enumerate() {
        if let Some(parent) = body.parent {
            assert!(parent < i, "{} listed before its parent", body.name);
        }
    }

    scene.advance(10.0);
    let earth = scene.world_position("EARTH").expect("earth");
    let r = vector::norm(&earth) / scene.au_scale();
    assert!((r - 1.0).abs() < 0.02, "earth at {} AU", r);
    let eye = scene.camera.eye(&scene);
    assert!(vector::distance(&eye, &earth) >= scene.camera.min_distance - 1e-9);

    let neptune = scene.body("NEPTUNE").expect("neptune");
    let r = vector::norm(&neptune.heliocentric_au);
    assert!(r > 29.0 && r < 31.0, "neptune at {} AU", r);
}

#[test]
fn halley_tail_near_perihelion_is_long() {
    let mut scene = bundled_scene();
    scene.step(parse_epoch("1986-02-09").expect("epoch"));
    let tails = scene.tails();
    let (_, tail) = tails
        .iter()
        .find(|(name, _)| *name == "HALLEY")
        .expect("halley tail");
    // r ≈ 0.586 AU at perihelion, so the tail is close to three base lengths.
    assert!(tail.length > 2.5 * 6.0 && tail.length <= 4.0 * 6.0, "length = {}", tail.length);
    let halley = scene.world_position("HALLEY").expect("halley");
    assert!(vector::dot(&tail.direction, &halley) > 0.0);
}

#[test]
fn sampled_ephemeris_feeds_positions() {
    let csv = "body,jd,x_au,y_au,z_au\nEARTH,2451545.0,-0.18,0.97,0.0\nEARTH,2451546.0,-0.20,0.96,0.0\n";
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("samples.csv");
    std::fs::write(&path, csv).expect("write csv");
    let sampled = SampledEphemeris::from_path(&path).expect("load samples");
    let p = sampled.position("earth", 2_451_545.5).expect("interpolated");
    assert!((p[0] + 0.19).abs() < 1e-12 && (p[1] - 0.965).abs() < 1e-12);
    assert!(sampled.position("EARTH", 2_451_547.0).is_err());
}
