use mazesnake::config::Config;
use mazesnake::food::{Food, FoodSpawner};
use mazesnake::session::{GameSession, Outcome};
use mazesnake::snake::{Crash, Direction, MoveResult, Snake};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn level_one() -> GameSession {
    GameSession::with_spawner(&Config::default(), 1, 0, FoodSpawner::with_seed(42))
}

/// Move the current food (keeping its kind) to the cell in front of the head.
fn food_ahead(session: &mut GameSession) {
    let (x, y) = session.snake().head();
    let is_bonus = session.food().map_or(false, |f| f.is_bonus);
    session.set_food(Food { pos: (x + 1, y), is_bonus });
}

#[test]
fn eating_in_front_of_start_position() {
    let mut session = level_one();
    assert_eq!(session.snake().head(), (35, 15));
    assert_eq!(session.snake().get_direction(), Direction::Right);
    assert_eq!(session.snake().len(), 3);

    session.set_food(Food { pos: (36, 15), is_bonus: false });
    assert_eq!(session.update(None), Outcome::Continue);
    assert_eq!(session.snake().len(), 4);
    assert_eq!(session.score(), 1);
    assert_eq!(session.fruits_eaten(), 1);
}

#[test]
fn stepping_onto_left_border_is_fatal() {
    let config = Config::default();
    let mut snake = Snake::new((1, 15), 3, Direction::Left, config.max_length);
    assert_eq!(snake.move_step(None, 1, &config), MoveResult::Crashed(Crash::Border));
}

#[test]
fn fifteen_fruits_clear_the_level() {
    let mut session = level_one();
    for eaten in 1..=14 {
        food_ahead(&mut session);
        assert_eq!(session.update(None), Outcome::Continue, "fruit {}", eaten);
    }
    food_ahead(&mut session);
    assert_eq!(session.update(None), Outcome::LevelCleared);

    assert_eq!(session.fruits_eaten(), 15);
    assert_eq!(session.money(), 300);
    assert_eq!(session.score(), 12 + 3 * 3);

    let next = GameSession::with_spawner(&Config::default(), 2, session.money(), FoodSpawner::with_seed(1));
    assert_eq!(next.fruits_eaten(), 0);
    assert_eq!(next.money(), 300);
}

#[test]
fn length_tracks_food_eaten() {
    let mut session = level_one();
    for n in 1..=10 {
        food_ahead(&mut session);
        session.update(None);
        assert_eq!(session.snake().len(), 3 + n);
    }
}

#[test]
fn snake_never_reverses_in_one_step() {
    let mut rng = StdRng::seed_from_u64(9);
    let dirs = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    let mut snake = Snake::new((35, 15), 3, Direction::Right, 1000);

    for _ in 0..1000 {
        let before = snake.get_direction();
        snake.set_direction(dirs[rng.gen_range(0..4)]);
        assert!(!snake.get_direction().is_opposite(before));
    }
}

#[test]
fn same_setup_moves_the_same_way() {
    let config = Config::default();
    for level in 1..=6 {
        let mut a = Snake::for_level(&config, level);
        let mut b = Snake::for_level(&config, level);
        for dir in [Direction::Down, Direction::Right, Direction::Down, Direction::Left].iter() {
            a.set_direction(*dir);
            b.set_direction(*dir);
            assert_eq!(a.move_step(None, level, &config), b.move_step(None, level, &config));
            assert_eq!(a.body(), b.body());
        }
    }
}
