use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use stevio::categories;
use stevio::puzzle::grid::GridBuffer;
use stevio::puzzle::{
    Coord, DEFAULT_GRID_SIZE, Direction, PlacedWord, Puzzle, check_word, generate_puzzle,
    normalize_words,
};

const SEEDS: u64 = 200;

fn assert_valid(puzzle: &Puzzle) {
    let size = puzzle.size;
    assert_eq!(puzzle.grid.size(), size);
    assert_eq!(puzzle.words.len(), puzzle.placed_words.len());

    for row in puzzle.grid.rows() {
        assert_eq!(row.len(), size);
        assert!(row.iter().all(|c| c.is_ascii_uppercase()));
    }
    assert_eq!(puzzle.grid.rows().count(), size);

    for (word, pw) in puzzle.words.iter().zip(&puzzle.placed_words) {
        assert_eq!(word, &pw.word);
        assert_eq!(pw.cells.len(), pw.word.chars().count());
        assert_eq!(pw.cells.first(), Some(&pw.start));

        let (dx, dy) = pw.direction.delta();
        for (i, (cell, letter)) in pw.cells.iter().zip(pw.word.chars()).enumerate() {
            assert!(cell.x < size && cell.y < size, "{cell:?} outside {size}x{size}");
            assert_eq!(*cell, Coord::new(pw.start.x + i * dx, pw.start.y + i * dy));
            assert_eq!(puzzle.grid.get(*cell), Some(letter));
        }
    }
}

#[test]
fn every_category_produces_valid_puzzles() {
    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        for category in categories::all() {
            let puzzle = generate_puzzle(&category.words, DEFAULT_GRID_SIZE, &mut rng);
            assert_valid(&puzzle);
        }
    }
}

#[test]
fn crowded_small_grids_stay_valid() {
    let words = categories::find("vintage").unwrap().words.clone();
    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        for size in 5..=8 {
            let puzzle = generate_puzzle(&words, size, &mut rng);
            assert_valid(&puzzle);
            assert!(puzzle.words.len() <= words.len());
        }
    }
}

#[test]
fn placed_words_are_in_length_order() {
    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let words = &categories::find("coffee").unwrap().words;
        let puzzle = generate_puzzle(words, 10, &mut rng);
        let lengths: Vec<usize> = puzzle.words.iter().map(|w| w.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]), "{lengths:?}");
    }
}

#[test]
fn every_placed_word_matches_both_ways() {
    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let words = &categories::find("nature").unwrap().words;
        let puzzle = generate_puzzle(words, 14, &mut rng);

        for pw in &puzzle.placed_words {
            let forward = check_word(&pw.cells, &puzzle.placed_words).unwrap();
            assert_eq!(forward.word, pw.word);

            let reversed: Vec<Coord> = pw.cells.iter().rev().copied().collect();
            let backward = check_word(&reversed, &puzzle.placed_words).unwrap();
            assert_eq!(backward.word, pw.word);
        }
    }
}

#[test]
fn non_matching_paths_return_none() {
    let mut rng = SmallRng::seed_from_u64(17);
    let puzzle = generate_puzzle(&["LEGEND", "QUEST"], 12, &mut rng);
    let lengths: HashSet<usize> = puzzle.placed_words.iter().map(|pw| pw.cells.len()).collect();

    let odd_length: Vec<Coord> = (0..7).map(|x| Coord::new(x, 0)).collect();
    assert!(!lengths.contains(&odd_length.len()));
    assert!(check_word(&odd_length, &puzzle.placed_words).is_none());

    // Same length as QUEST, but one cell off the end of it
    let quest = puzzle.placed_word("QUEST").unwrap();
    let shifted: Vec<Coord> = (1..=5).map(|i| quest.start.step(quest.direction, i)).collect();
    assert_eq!(shifted.len(), 5);
    assert_ne!(shifted[0], quest.start);
    assert!(check_word(&shifted, &puzzle.placed_words).is_none());
}

#[test]
fn normalization_ignores_case_and_spaces() {
    let clean = ["SUNSET", "RAINBOW", "BLOOM"];
    let messy = ["sun set", " Rain Bow ", "bloom\n"];
    assert_eq!(normalize_words(&clean, 12), normalize_words(&messy, 12));

    for seed in 0..20 {
        let a = generate_puzzle(&clean, 12, &mut SmallRng::seed_from_u64(seed));
        let b = generate_puzzle(&messy, 12, &mut SmallRng::seed_from_u64(seed));
        assert_eq!(a.placed_words, b.placed_words);
        assert_eq!(a.grid, b.grid);
    }
}

#[test]
fn empty_word_list_gives_noise_only_grid() {
    let mut rng = SmallRng::seed_from_u64(0);
    let empty: [&str; 0] = [];
    let puzzle = generate_puzzle(&empty, 12, &mut rng);
    assert_eq!(puzzle.size, 12);
    assert!(puzzle.words.is_empty());
    assert!(puzzle.placed_words.is_empty());
    assert_valid(&puzzle);

    let blanks = generate_puzzle(&["", "   "], 12, &mut rng);
    assert!(blanks.words.is_empty());
}

#[test]
fn oversized_word_is_dropped() {
    let mut rng = SmallRng::seed_from_u64(0);
    let puzzle = generate_puzzle(&["SUPERCALIFRAGILISTIC"], 5, &mut rng);
    assert!(puzzle.placed_words.is_empty());
    assert!(puzzle.placed_word("SUPERCALIFRAGILISTIC").is_none());
    assert_valid(&puzzle);
}

#[test]
fn crossing_words_share_their_letter() {
    // CAT and CAR on a 3x3 grid often cross at their C or their A
    let mut crossed = 0;
    for seed in 0..SEEDS {
        let mut rng = SmallRng::seed_from_u64(seed);
        let puzzle = generate_puzzle(&["CAT", "CAR"], 3, &mut rng);
        assert_valid(&puzzle);

        let (Some(cat), Some(car)) = (puzzle.placed_word("CAT"), puzzle.placed_word("CAR")) else {
            continue;
        };
        for (i, cell) in cat.cells.iter().enumerate() {
            let Some(j) = car.cells.iter().position(|c| c == cell) else {
                continue;
            };
            crossed += 1;
            assert_ne!(cat.direction, car.direction);
            assert_eq!(cat.word.chars().nth(i), car.word.chars().nth(j));
            assert_eq!(puzzle.grid.get(*cell), cat.word.chars().nth(i));
        }
    }
    assert!(crossed > 0, "no seed produced a crossing");
}

#[test]
fn explicit_crossing_keeps_shared_c() {
    let mut buffer = GridBuffer::new(5);
    let cat: Vec<char> = "CAT".chars().collect();
    let car: Vec<char> = "CAR".chars().collect();
    let origin = Coord::new(0, 0);

    let cat_cells = buffer.place(&cat, origin, Direction::Horizontal);
    assert!(buffer.can_place(&car, origin, Direction::Vertical));
    let car_cells = buffer.place(&car, origin, Direction::Vertical);
    let grid = buffer.fill_noise(&mut SmallRng::seed_from_u64(1));

    assert_eq!(grid.get(origin), Some('C'));
    assert_eq!(grid.letters_at(&cat_cells), "CAT");
    assert_eq!(grid.letters_at(&car_cells), "CAR");

    let placed = vec![
        PlacedWord {
            word: "CAT".to_string(),
            start: origin,
            direction: Direction::Horizontal,
            cells: cat_cells.clone(),
        },
        PlacedWord {
            word: "CAR".to_string(),
            start: origin,
            direction: Direction::Vertical,
            cells: car_cells.clone(),
        },
    ];
    assert_eq!(check_word(&cat_cells, &placed).map(|pw| pw.word.as_str()), Some("CAT"));
    assert_eq!(check_word(&car_cells, &placed).map(|pw| pw.word.as_str()), Some("CAR"));
}

#[test]
fn puzzle_round_trips_through_json() {
    let mut rng = SmallRng::seed_from_u64(30);
    let puzzle = generate_puzzle(&["MEADOW", "RIVER"], 8, &mut rng);
    let json = serde_json::to_string(&puzzle).unwrap();
    assert!(json.contains("\"placed_words\""));
    assert!(json.contains("\"direction\":\"horizontal\"") || json.contains("\"direction\":\"vertical\""));

    let back: Puzzle = serde_json::from_str(&json).unwrap();
    assert_eq!(back.grid, puzzle.grid);
    assert_eq!(back.placed_words, puzzle.placed_words);
}
