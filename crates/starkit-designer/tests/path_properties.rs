use proptest::prelude::*;
use starkit_designer::{build_path, PathCommand, Point, StarParameters};

fn params(spokes: u32, inner: f64, roundness: f64) -> StarParameters {
    StarParameters::new(Point::new(640.0, 358.0), spokes, 120.0, inner, roundness)
}

#[test]
fn test_default_star_is_closed_sixteen_gon() {
    let outline = build_path(&StarParameters::with_origin(Point::new(640.0, 358.0)));
    assert_eq!(outline.vertices().len(), 16);
    assert!(outline.is_closed());
    assert!(outline.is_simple());
    assert!(outline
        .commands
        .iter()
        .all(|c| !matches!(c, PathCommand::QuadTo { .. })));
}

#[test]
fn test_extreme_stars_are_simple() {
    for spokes in [3, 4, 5, 8, 50, 200] {
        for inner in [3.0, 60.0, 120.0] {
            for roundness in [0.0, 0.01, 0.25, 0.499] {
                let outline = build_path(&params(spokes, inner, roundness));
                assert!(
                    outline.is_simple(),
                    "spokes={} inner={} roundness={}",
                    spokes,
                    inner,
                    roundness
                );
            }
        }
    }
}

#[test]
fn test_lyon_path_matches_commands() {
    let outline = build_path(&params(6, 70.0, 0.0));
    let path = outline.render();
    // Every command becomes one lyon event: begin, line segments, end.
    assert_eq!(path.iter().count(), outline.commands.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sharp_star_has_two_vertices_per_spoke(spokes in 3u32..=200, inner in 3.0f64..120.0) {
        let outline = build_path(&params(spokes, inner, 0.0));
        prop_assert!(outline.is_closed());
        prop_assert_eq!(outline.vertices().len(), 2 * spokes as usize);
    }

    #[test]
    fn prop_rounded_star_is_simple(
        spokes in 3u32..=200,
        inner in 3.0f64..=120.0,
        roundness in 0.001f64..=0.499,
    ) {
        let outline = build_path(&params(spokes, inner, roundness));
        prop_assert!(outline.is_closed());
        prop_assert!(outline.is_simple());
    }
}
