/// Example: Place a locally-authored mesh transform in a large world frame
///
/// Usage: RUST_LOG=debug cargo run --example georeference

use coordbridge_core::{CoordinateConverter, EngineIntVector, EngineMatrix, EngineVector};
use nalgebra::Vector4;

fn main() {
    env_logger::init();

    // A 90 degree turn about z with a small local offset
    let local = EngineMatrix::from_axes(
        EngineVector::new(0.0, 1.0, 0.0),
        EngineVector::new(-1.0, 0.0, 0.0),
        EngineVector::new(0.0, 0.0, 1.0),
        EngineVector::new(1.5, -2.25, 0.0),
    );

    // Integer tile origin far from the world origin
    let tile_origin = EngineIntVector::new(6_378_137, 0, -1_000_000);

    let world_position = CoordinateConverter::add_3d(&local.translation(), &tile_origin);
    log::info!("World position of the local origin: {world_position:?}");

    let world = CoordinateConverter::to_double_matrix_with_translation(&local, &world_position);
    let corner = world * Vector4::new(1.0, 0.0, 0.0, 1.0);
    println!("Corner (1, 0, 0) in world coordinates: {corner:?}");

    // Narrowing the world transform back loses the fractional part of the offset
    let narrowed = CoordinateConverter::to_engine_matrix(&world);
    println!(
        "Narrowed translation: {:?} (exact: {:?})",
        narrowed.translation(),
        world_position
    );

    let far = CoordinateConverter::translation_matrix(1e40, 0.0, 0.0, 1.0);
    match CoordinateConverter::try_to_engine_matrix(&far) {
        Ok(m) => println!("Unexpectedly narrowed: {m:?}"),
        Err(err) => println!("Checked narrowing failed as expected: {err}"),
    }
}
