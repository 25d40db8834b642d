//! End-to-end behaviour of the grid model through the public API
use std::sync::{Arc, Mutex};
use tile_raycast::{Change, GridConfig, GridModel, GridDisplayConfig, TileState};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn visited_cells(model: &GridModel) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for (row, tiles) in model.tiles().iter_rows().enumerate() {
        for (col, tile) in tiles.iter().enumerate() {
            if *tile == TileState::Visited {
                cells.push((col as i32, row as i32));
            }
        }
    }
    cells
}

#[test]
fn test_diagonal_across_default_grid() {
    init_logging();
    let mut model = GridModel::new();
    model.set_start(0, 0);
    model.set_end(319, 319);

    assert_eq!(model.start_cell(), (0, 0));
    assert_eq!(model.end_cell(), (9, 9));
    let expected: Vec<_> = (0..10).map(|i| (i, i)).collect();
    assert_eq!(visited_cells(&model), expected);
    assert_eq!(model.path(), expected.as_slice());
}

#[test]
fn test_horizontal_across_default_grid() {
    init_logging();
    let mut model = GridModel::new();
    model.set_end(319, 0);
    let expected: Vec<_> = (0..10).map(|x| (x, 0)).collect();
    assert_eq!(visited_cells(&model), expected);
}

#[test]
fn test_pixel_boundaries_floor() {
    let mut model = GridModel::new();
    model.set_end(31, 0);
    assert_eq!(model.end_cell(), (0, 0));
    model.set_end(32, 0);
    assert_eq!(model.end_cell(), (1, 0));
}

#[test]
fn test_tile_size_bounds() {
    let mut model = GridModel::new();
    model.set_tile_size(500);
    assert_eq!(model.tile_size(), 128);
    assert_eq!(model.pixel_width(), 1280);
    model.set_tile_size(1);
    assert_eq!(model.tile_size(), 8);
    assert_eq!(model.pixel_height(), 80);
}

#[test]
fn test_clamp_lower_and_upper_bounds() {
    let mut model = GridModel::new();
    model.set_start(-1, -1);
    assert_eq!(model.start(), (0, 0));
    model.set_start(i32::MAX, i32::MIN);
    assert_eq!(model.start(), (319, 0));
    model.set_end(320, 320);
    assert_eq!(model.end(), (319, 319));
}

#[test]
fn test_every_change_rebuilds_visited_set() {
    init_logging();
    let mut model = GridModel::new();
    model.set_end(319, 319);
    assert_eq!(model.visited_count(), 10);

    // Moving the end point drops the old diagonal entirely
    model.set_end(0, 319);
    assert_eq!(visited_cells(&model), (0..10).map(|y| (0, y)).collect::<Vec<_>>());

    model.set_grid_size(3, 3);
    assert_eq!(model.tiles().len(), 9);
    assert_eq!(model.end(), (0, 95));
    assert_eq!(model.visited_count(), 3);
}

#[test]
fn test_notifications_only_on_real_changes() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    let mut model = GridModel::new();
    model.on_change(move |change| sink.lock().unwrap().push(change));

    assert!(model.set_tile_size(16));
    assert!(!model.set_tile_size(16));
    assert!(model.set_start(100, 100));
    assert!(!model.set_start(100, 100));
    assert!(model.set_end(159, 159));
    assert!(!model.set_end(400, 400)); // clamps to (159, 159)
    assert!(model.set_grid_size(20, 20));

    assert_eq!(
        *changes.lock().unwrap(),
        vec![Change::TileSize, Change::Start, Change::End, Change::GridSize]
    );
}

#[test]
fn test_tile_growth_keeps_pixels_and_moves_cells() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    let mut model = GridModel::new();
    model.set_end(300, 10);
    model.on_change(move |change| sink.lock().unwrap().push(change));

    model.set_tile_size(8);
    // Extents shrink to 80 px: the end point is pulled back inside
    assert_eq!(model.end(), (79, 10));
    assert_eq!(model.end_cell(), (9, 1));
    assert_eq!(*changes.lock().unwrap(), vec![Change::TileSize, Change::End]);
}

#[test]
fn test_geometry_change_pulls_start_back_inside() {
    init_logging();
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    let mut model = GridModel::new();
    model.set_start(300, 300);
    model.on_change(move |change| sink.lock().unwrap().push(change));

    // Extents shrink to 160 px; the end point at the origin stays put
    assert!(model.set_grid_size(5, 5));
    assert_eq!(model.start(), (159, 159));
    assert_eq!(model.start_cell(), (4, 4));
    assert_eq!(model.end(), (0, 0));
    assert_eq!(*changes.lock().unwrap(), vec![Change::GridSize, Change::Start]);

    changes.lock().unwrap().clear();
    model.set_end(159, 0);
    assert!(model.set_tile_size(8));
    assert_eq!(model.start(), (39, 39));
    assert_eq!(model.end(), (39, 0));
    assert_eq!(
        *changes.lock().unwrap(),
        vec![Change::End, Change::TileSize, Change::Start, Change::End]
    );
    assert_eq!(visited_cells(&model), (0..5).map(|y| (4, y)).collect::<Vec<_>>());
}

#[test]
fn test_model_from_config_and_render() {
    let config = GridConfig::new(5, 2, 20).with_endpoints((0, 39), (99, 0));
    let model = GridModel::from_config(&config);
    assert_eq!(model.start_cell(), (0, 1));
    assert_eq!(model.end_cell(), (4, 0));
    assert_eq!(model.start_label(), "0, 1");

    let display_config = GridDisplayConfig {
        show_headers: false,
        show_endpoints: false,
        use_color: false,
    };
    let text = tile_raycast::render_grid(&model, &display_config);
    assert_eq!(text.lines().count(), 3);
    assert_eq!(text.matches('S').count(), 1);
    assert_eq!(text.matches('E').count(), 1);
}
