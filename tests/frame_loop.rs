//! Integration tests for the frame update loop.
//!
//! These drive `Starfield::advance` the way the host does and check the
//! depth, opacity, proximity and decay behavior across many frames.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use starfield::particle::{is_near, star_opacity, STAR_PALETTE};
use starfield::{Particle, ParticleKind, Population, Starfield, StarfieldParams};

fn field_with_star_at(z: f64, params: StarfieldParams) -> Starfield {
    let stars = Population::new(
        ParticleKind::Star,
        params.star_distribution,
        params.base_star_speed,
        vec![Particle::star(0.0, 0.0, z, 3.0, STAR_PALETTE[0], 1.0, true)],
    );
    let dust = Population::new(ParticleKind::Dust, params.dust_distribution, params.base_dust_speed, Vec::new());
    Starfield::from_populations(params, stars, dust)
}

#[test]
fn test_depth_stays_in_range_with_irregular_frames() {
    let params = StarfieldParams {
        seed: Some(42),
        star_count: 300,
        dust_count: 100,
        base_star_speed: 400.0,
        base_dust_speed: 900.0,
        ..Default::default()
    };
    let mut starfield = Starfield::new(params);
    let mut rng = Pcg64Mcg::seed_from_u64(8);

    for frame in 0..2000 {
        // Mostly 60-144 Hz frames with the odd long stall
        let dt = if frame % 250 == 0 { rng.gen_range(5.0..30.0) } else { rng.gen_range(1.0 / 144.0..1.0 / 60.0) };
        starfield.advance(dt);

        for population in [starfield.stars(), starfield.dust()] {
            let half = population.half_distribution();
            for p in &population.particles {
                assert!(p.z >= -half && p.z < half, "z {} escaped [-{}, {})", p.z, half, half);
            }
        }
    }
}

#[test]
fn test_wrap_conserves_overshoot() {
    let params = StarfieldParams::default();
    let epsilon = 0.05;
    let mut starfield = field_with_star_at(-750.0 + epsilon, params);

    // One second moves 0.2, which is more than epsilon
    starfield.advance(1.0);
    let z = starfield.stars().particles[0].z;
    assert!((z - (750.0 - (0.2 - epsilon))).abs() < 1e-9, "z = {}", z);
}

#[test]
fn test_star_placed_past_far_boundary_rejoins_span() {
    let params = StarfieldParams::default();
    let mut starfield = field_with_star_at(900.0, params);

    for _ in 0..10 {
        starfield.advance(1.0 / 60.0);
        let z = starfield.stars().particles[0].z;
        assert!((-750.0..750.0).contains(&z), "z = {}", z);
    }
}

#[test]
fn test_full_lap_returns_to_start() {
    let params = StarfieldParams::default();
    let mut starfield = field_with_star_at(0.0, params);

    let mut wraps = 0;
    let mut previous = 0.0;
    for _ in 0..7500 {
        starfield.advance(1.0);
        let z = starfield.stars().particles[0].z;
        if z > previous {
            wraps += 1;
        }
        previous = z;
    }

    assert_eq!(wraps, 1);
    assert!(previous.abs() < 1e-6, "z = {}", previous);
}

#[test]
fn test_opacity_rises_with_depth() {
    for base in [0.6, 0.8, 1.0] {
        let mut last = 0.0;
        for step in 0..=100 {
            let opacity = star_opacity(step as f64 / 100.0, base);
            assert!(opacity >= last);
            assert!(opacity <= 1.0);
            assert!(opacity >= 0.2 * base - 1e-12);
            last = opacity;
        }
    }
}

#[test]
fn test_frame_opacity_matches_depth() {
    let params = StarfieldParams::default();
    let mut starfield = field_with_star_at(300.0, params);
    starfield.advance(0.0);

    let look = starfield.stars().particles[0].star_look().unwrap();
    let norm_z = (300.0 + 750.0) / 1500.0;
    assert!((look.opacity - star_opacity(norm_z, 1.0)).abs() < 1e-12);
}

#[test]
fn test_proximity_shell_bounds() {
    let distribution = 1500.0;
    let threshold = 150.0;

    assert!(is_near(-750.0, distribution, threshold));
    assert!(is_near(-600.0 - 1e-9, distribution, threshold));
    assert!(!is_near(-600.0, distribution, threshold));
    assert!(!is_near(0.0, distribution, threshold));
    assert!(!is_near(749.0, distribution, threshold));
}

#[test]
fn test_near_flag_in_running_field() {
    let params = StarfieldParams { seed: Some(5), ..Default::default() };
    let mut starfield = Starfield::new(params);
    starfield.advance(1.0 / 60.0);

    for p in &starfield.stars().particles {
        let look = p.star_look().unwrap();
        assert_eq!(look.near, p.z < -750.0 + 150.0);
    }
}

#[test]
fn test_pointer_decay_is_frame_rate_independent() {
    let initial = 12.0;
    let expected = initial * 0.92f64.powf(60.0 * 1.5);

    for steps in [1usize, 90, 144, 1000] {
        let mut starfield = field_with_star_at(0.0, StarfieldParams::default());
        starfield.camera_mut().add_pointer_delta(initial, -initial);

        let dt = 1.5 / steps as f64;
        for _ in 0..steps {
            starfield.advance(dt);
        }

        let camera = starfield.camera();
        assert!((camera.yaw_delta - expected).abs() < 1e-9, "{} steps: {}", steps, camera.yaw_delta);
        assert!((camera.pitch_delta + expected).abs() < 1e-9);
    }
}

#[test]
fn test_same_seed_same_frames() {
    let params = StarfieldParams { seed: Some(77), star_count: 50, dust_count: 20, ..Default::default() };
    let mut a = Starfield::new(params.clone());
    let mut b = Starfield::new(params);

    for _ in 0..120 {
        a.advance(1.0 / 60.0);
        b.advance(1.0 / 60.0);
    }

    assert_eq!(a.stars().particles, b.stars().particles);
    assert_eq!(a.dust().particles, b.dust().particles);
    assert_eq!(a.camera(), b.camera());
}

#[test]
fn test_empty_populations_advance() {
    let params = StarfieldParams { seed: Some(1), star_count: 0, dust_count: 0, ..Default::default() };
    let mut starfield = Starfield::new(params);
    assert!(starfield.stars().is_empty());
    assert!(starfield.advance(1.0 / 60.0).is_some());
}

#[test]
fn test_run_handle_stops_from_another_thread() {
    let mut starfield = field_with_star_at(0.0, StarfieldParams::default());
    let handle = starfield.run_handle();

    std::thread::spawn(move || handle.stop()).join().unwrap();

    assert!(starfield.advance(1.0).is_none());
}

#[test]
fn test_double_toggle_restores_status() {
    let mut starfield = field_with_star_at(0.0, StarfieldParams::default());
    let original = starfield.status_text();
    starfield.toggle_detail();
    starfield.toggle_detail();
    assert_eq!(starfield.status_text(), original);
}
