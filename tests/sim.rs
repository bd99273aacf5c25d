use std::collections::HashMap;

use formicary::{Conf, Data, Point2i, Tile, World};

/// Number of ticks of the end-to-end runs.
const TICKS: usize = 1200;

/// The simulated duration of each tick, in seconds.
const T_DELTA: f32 = 0.05;

/// Collects the observable state of the world, as a rendering front-end
/// would see it.
fn snapshot(world: &World) -> Vec<(Point2i, Tile, Data)> {
    world
        .elements()
        .map(|el| (el.pos(), el.tile(), el.data()))
        .collect()
}

/// Checks the structural invariants of the grid: solid elements own their
/// cell, pheromones are unique per cell and scent and never linger once
/// empty, and every payload matches its kind.
fn assert_invariants(world: &World) {
    let mut solids: HashMap<Point2i, usize> = HashMap::new();
    let mut scents: HashMap<(Point2i, formicary::Scent), usize> =
        HashMap::new();

    for el in world.elements() {
        match el.tile() {
            Tile::Colony | Tile::Food | Tile::Obstacle => {
                let seen = solids.entry(el.pos()).or_insert(0);
                *seen += 1;
                assert!(
                    *seen <= 1,
                    "two solid elements share the cell {}",
                    el.pos()
                );
            }
            Tile::Pheromon => match el.data() {
                Data::Pheromon { scent, amount, .. } => {
                    assert!(amount > 0.0, "empty pheromone at {}", el.pos());
                    let seen =
                        scents.entry((el.pos(), scent)).or_insert(0);
                    *seen += 1;
                    assert!(
                        *seen <= 1,
                        "unmerged {} pheromones at {}",
                        scent,
                        el.pos()
                    );
                }
                data => panic!("unexpected pheromone payload {:?}", data),
            },
            Tile::Ant => match el.data() {
                Data::Ant(_) => (),
                data => panic!("unexpected ant payload {:?}", data),
            },
        }
    }
}

#[test]
fn opening_scenario_matches_the_configuration() {
    let world = World::new(Conf::default());
    assert_eq!(world.count(Tile::Colony), 1);
    assert_eq!(world.count(Tile::Food), 4);
    // four walls of 7 cells each
    assert_eq!(world.count(Tile::Obstacle), 28);
    assert_eq!(world.count(Tile::Ant), 0);
    assert_eq!(world.moment(), 0.0);
}

#[test]
fn simulation_respects_grid_invariants() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut world = World::new(Conf::default());
    let mut pheromones_seen = 0;

    for _ in 0..TICKS {
        world.step(T_DELTA);
        assert_invariants(&world);
        pheromones_seen = pheromones_seen.max(world.count(Tile::Pheromon));
    }

    // the colony put its initial budget to work and the ants left trails
    // behind them
    assert!(world.count(Tile::Ant) >= 1);
    assert!(pheromones_seen > 0);
}

#[test]
fn equal_seeds_produce_identical_runs() {
    let mut first = World::new(Conf::default());
    let mut second = World::new(Conf::default());

    // uneven deltas, as an animation frame driver would produce
    for id in 0..400 {
        let t_delta = if id % 3 == 0 { 0.016 } else { 0.021 };
        first.step(t_delta);
        second.step(t_delta);
    }

    assert_eq!(snapshot(&first), snapshot(&second));
}

#[test]
fn fast_forward_is_proportional_to_the_delta() {
    // the effect of a step is proportional to its delta, so the moment
    // reached by few large steps matches many small ones
    let mut slow = World::new(Conf::default());
    let mut fast = World::new(Conf::default());

    for _ in 0..8 {
        slow.step(0.25);
    }
    fast.step(2.0);

    assert_eq!(slow.moment(), fast.moment());
}
