//! Hopper - Main Entry Point
//!
//! Headless demo: runs a scripted input sequence through the test course
//! and prints what the character does. Useful for eyeballing movement
//! tuning without a renderer attached.

use hopper_game::{InputFrame, InputSampler, Simulation};

/// One segment of the demo script: held keys, applied for a number of ticks.
struct ScriptStep {
    ticks: u32,
    right: bool,
    jump: bool,
    label: &'static str,
}

const SCRIPT: &[ScriptStep] = &[
    ScriptStep {
        ticks: 30,
        right: false,
        jump: false,
        label: "settle on the floor",
    },
    ScriptStep {
        ticks: 90,
        right: true,
        jump: false,
        label: "run toward the first platform",
    },
    ScriptStep {
        ticks: 20,
        right: true,
        jump: true,
        label: "jump onto it",
    },
    ScriptStep {
        ticks: 40,
        right: true,
        jump: false,
        label: "keep running",
    },
    ScriptStep {
        ticks: 25,
        right: true,
        jump: true,
        label: "jump again",
    },
    ScriptStep {
        ticks: 120,
        right: true,
        jump: false,
        label: "run up the ramp",
    },
    ScriptStep {
        ticks: 60,
        right: false,
        jump: false,
        label: "come to rest",
    },
];

fn main() {
    env_logger::init();

    let mut sim = Simulation::test();
    let player_id = sim.add_player("Demo");
    let mut sampler = InputSampler::new();

    println!(
        "course '{}' with {} brushes, tick rate {} Hz",
        sim.level.name,
        sim.level.collision.brush_count(),
        sim.config.tick_rate
    );

    for step in SCRIPT {
        for _ in 0..step.ticks {
            let frame: InputFrame = sampler.sample(false, step.right, false, false, step.jump);
            sim.tick(&[frame]);
        }

        let player = sim.get_player(player_id).expect("demo player exists");
        let pos = player.position();
        println!(
            "tick {:4} | {:32} | pos ({:6.2}, {:5.2}, {:5.2}) | {}{}",
            sim.frame,
            step.label,
            pos.x,
            pos.y,
            pos.z,
            if player.on_ground() { "grounded" } else { "airborne" },
            if player.spinning() { ", spinning" } else { "" },
        );
    }

    let player = sim.get_player(player_id).expect("demo player exists");
    println!(
        "finished at {:?} after {} ticks",
        player.position(),
        sim.frame
    );
}
