use landform_config::{
    DecorationConfig, FeatureLayout, LawnPatch, NormalMode, ReliefProfile, RoadCorridor,
    TerrainConfig, WaterBasin,
};
use landform_mesh::{TerrainGenerator, generate_terrain_mesh, surface_vertex_count};
use landform_terrain::{
    ElementType, HeightFieldSynthesizer, TypeGrid, admissible_bounds, apply_layout,
};

fn no_props() -> DecorationConfig {
    DecorationConfig {
        tree_count: Some(0),
        building_count: Some(0),
    }
}

#[test]
fn identical_config_gives_byte_identical_mesh() {
    for normal_mode in [NormalMode::Flat, NormalMode::Smooth, NormalMode::Gradient] {
        let config = TerrainConfig {
            base_grid_size: 24,
            target_grid_size: 60,
            normal_mode,
            ..Default::default()
        };
        let a = generate_terrain_mesh(&config).unwrap();
        let b = generate_terrain_mesh(&config).unwrap();
        assert_eq!(a.mesh.position_bytes(), b.mesh.position_bytes());
        assert_eq!(a.mesh.color_bytes(), b.mesh.color_bytes());
        assert_eq!(a.mesh.normal_bytes(), b.mesh.normal_bytes());
        assert_eq!(a.mesh.tex_coord_bytes(), b.mesh.tex_coord_bytes());
        assert_eq!(a.mesh.type_bytes(), b.mesh.type_bytes());
        assert_eq!(a, b);
    }
}

#[test]
fn different_seed_changes_mesh() {
    let base = TerrainConfig {
        base_grid_size: 16,
        interpolate: false,
        ..Default::default()
    };
    let other = TerrainConfig { seed: 7, ..base.clone() };
    let a = generate_terrain_mesh(&base).unwrap();
    let b = generate_terrain_mesh(&other).unwrap();
    assert_ne!(a.mesh.positions, b.mesh.positions);
}

#[test]
fn four_by_four_grid_without_overlays_emits_54_vertices() {
    let config = TerrainConfig {
        base_grid_size: 4,
        terrain_size: 100.0,
        seed: 42,
        interpolate: false,
        features: FeatureLayout::none(),
        ..Default::default()
    };
    let out = generate_terrain_mesh(&config).unwrap();
    assert_eq!(out.mesh.vertex_count, 54);
    assert_eq!(out.mesh.triangle_count(), 18);
    assert_eq!(out.tree_count(), 0);
    assert_eq!(out.building_count(), 0);
}

#[test]
fn surface_vertex_count_is_six_per_cell() {
    for (base, target, interpolate) in [(10, 10, false), (10, 25, true), (33, 50, true)] {
        let config = TerrainConfig {
            base_grid_size: base,
            target_grid_size: target,
            interpolate,
            decorations: no_props(),
            ..Default::default()
        };
        let out = generate_terrain_mesh(&config).unwrap();
        let g = config.active_grid_size();
        assert_eq!(out.mesh.vertex_count, 6 * (g - 1) * (g - 1));
        assert_eq!(out.mesh.vertex_count % 3, 0);
    }
}

#[test]
fn smoothed_normals_have_unit_length() {
    let config = TerrainConfig {
        base_grid_size: 30,
        target_grid_size: 80,
        normal_mode: NormalMode::Smooth,
        ..Default::default()
    };
    let mesh = generate_terrain_mesh(&config).unwrap().mesh;
    for i in 0..mesh.vertex_count {
        let [x, y, z] = mesh.normal(i);
        let len = (x * x + y * y + z * z).sqrt();
        assert!((len - 1.0).abs() < 1e-3, "vertex {i} normal length {len}");
    }
}

#[test]
fn gradient_normals_have_unit_length() {
    let config = TerrainConfig {
        base_grid_size: 20,
        interpolate: false,
        normal_mode: NormalMode::Gradient,
        relief: ReliefProfile::Fractal,
        ..Default::default()
    };
    let mesh = generate_terrain_mesh(&config).unwrap().mesh;
    for i in 0..surface_vertex_count(20) {
        let [x, y, z] = mesh.normal(i);
        assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-3);
        assert!(y > 0.0);
    }
}

#[test]
fn disabled_interpolation_keeps_base_grid() {
    let config = TerrainConfig {
        base_grid_size: 18,
        target_grid_size: 90,
        interpolate: false,
        ..Default::default()
    };
    let out = generate_terrain_mesh(&config).unwrap();

    let mut heights = HeightFieldSynthesizer::new(&config).synthesize(18).unwrap();
    let mut types = TypeGrid::filled(18, ElementType::Land).unwrap();
    let range = heights.range();
    apply_layout(&mut heights, &mut types, &config.features, range);

    assert_eq!(out.height_grid().size(), 18);
    assert_eq!(out.height_grid(), &heights);
}

#[test]
fn heights_stay_within_admissible_bounds() {
    let reliefs = [ReliefProfile::Classic, ReliefProfile::Layered, ReliefProfile::Fractal];
    for relief in reliefs {
        for interpolate in [false, true] {
            let config = TerrainConfig {
                relief,
                interpolate,
                ..Default::default()
            };
            let out = generate_terrain_mesh(&config).unwrap();
            let bounds = admissible_bounds(&config);
            for &h in out.height_grid().as_slice() {
                assert!(h.is_finite());
                assert!(
                    bounds.contains(h),
                    "{relief:?} interpolate={interpolate}: {h} outside {bounds:?}"
                );
            }
            let range = out.height_range();
            assert!(bounds.contains(range.min) && bounds.contains(range.max));
        }
    }
}

#[test]
fn reported_range_matches_active_grid() {
    let out = generate_terrain_mesh(&TerrainConfig::default()).unwrap();
    let range = out.height_range();
    assert_eq!(range, out.height_grid().range());
    let image = out.heightmap_image();
    assert_eq!(image.dimensions(), (200, 200));
}

#[test]
fn no_buildings_when_water_covers_every_site() {
    let config = TerrainConfig {
        base_grid_size: 40,
        interpolate: false,
        features: FeatureLayout {
            water: Some(WaterBasin {
                center: [0.5, 0.5],
                radius: 40,
                depth: 1.0,
            }),
            ..FeatureLayout::none()
        },
        decorations: DecorationConfig {
            tree_count: Some(0),
            building_count: Some(25),
        },
        ..Default::default()
    };
    let out = generate_terrain_mesh(&config).unwrap();
    assert_eq!(out.building_count(), 0);
    assert_eq!(out.mesh.count_of(ElementType::HouseWall), 0);
    assert_eq!(out.mesh.count_of(ElementType::Roof), 0);
    assert_eq!(out.mesh.count_of(ElementType::WaterPool), out.mesh.vertex_count);
}

#[test]
fn default_configuration_produces_props() {
    let generator = TerrainGenerator::new(TerrainConfig::default()).unwrap();
    let out = generator.generate().unwrap();
    assert!(out.tree_count() > 0);
    assert_eq!(
        out.mesh.count_of(ElementType::Trunk),
        out.tree_count() * landform_mesh::BOX_VERTEX_COUNT
    );
    assert_eq!(
        out.mesh.count_of(ElementType::HouseWall),
        out.building_count() * landform_mesh::BOX_VERTEX_COUNT
    );
}

#[test]
fn oversized_features_are_clipped_to_the_grid() {
    let config = TerrainConfig {
        base_grid_size: 10,
        interpolate: false,
        features: FeatureLayout {
            road: Some(RoadCorridor {
                center: [0.5, 0.5],
                length: 1e20,
                width: 2,
            }),
            lawn: Some(LawnPatch {
                center: [0.5, 0.5],
                radius: 20_000,
            }),
            ..FeatureLayout::none()
        },
        decorations: no_props(),
        ..Default::default()
    };
    config.validate().unwrap();
    let out = generate_terrain_mesh(&config).unwrap();
    assert_eq!(out.overlays().road, 20);
    assert_eq!(out.overlays().lawn, 80);
    assert_eq!(out.mesh.vertex_count, 6 * 9 * 9);
}
