//! Tests for the file-backed puzzle provider and response parsing.

use std::fs;

use mindmatch::{
    FilePuzzleProvider, GameMachine, GameStatus, PuzzleProvider, parse_puzzle_response,
};
use tempfile::TempDir;

const PUZZLE: &str = r#"{
  "categories": [
    {"name": "Planets", "description": "Orbit the Sun", "items": ["Mercury", "Venus", "Mars", "Saturn"]},
    {"name": "Roman gods", "description": "Pantheon", "items": ["Jupiter", "Minerva", "Juno", "Vulcan"]},
    {"name": "Chocolate bars", "description": "Sweets", "items": ["Galaxy", "Milky Way", "Starbar", "Orbit"]},
    {"name": "Car models", "description": "Vehicles", "items": ["Eclipse", "Nova", "Comet", "Aurora"]}
  ]
}"#;

#[tokio::test]
async fn test_file_provider_loads_puzzle() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("puzzle.json");
    fs::write(&path, PUZZLE).expect("Failed to write puzzle");

    let provider = FilePuzzleProvider::new(&path);
    let puzzle = provider.generate("anything").await.expect("Valid puzzle file");
    assert_eq!(puzzle.categories.len(), 4);
    assert_eq!(puzzle.categories[1].items[2], "Juno");
}

#[tokio::test]
async fn test_file_provider_missing_file_goes_idle() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let provider = FilePuzzleProvider::new(dir.path().join("missing.json"));

    let mut machine = GameMachine::with_seed("History", 4, 1);
    let session = machine.start_game(&provider, "History").await;
    assert_eq!(session.status(), GameStatus::Idle);
    assert_eq!(
        session.last_error(),
        Some("Failed to generate puzzle. Please try again.")
    );
}

#[tokio::test]
async fn test_start_game_with_file_provider() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("puzzle.json");
    fs::write(&path, PUZZLE).expect("Failed to write puzzle");

    let provider = FilePuzzleProvider::new(&path);
    let mut machine = GameMachine::with_seed("Space", 4, 1);
    let session = machine.start_game(&provider, "Space").await;
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.description_of("Planets"), "Orbit the Sun");
}

#[test]
fn test_sample_puzzle_is_valid() {
    let text = include_str!("../puzzles/sample.json");
    let puzzle = parse_puzzle_response(text).expect("Sample parses");
    assert!(mindmatch::validate(&puzzle).is_ok());
}
