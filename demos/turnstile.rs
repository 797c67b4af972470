//! Turnstile
//!
//! This demo drives a coin-operated turnstile through the message API.
//!
//! Key concepts:
//! - Declaring a graph with the fluent builder and `trigger_enum!`
//! - Guarded transitions and entry actions
//! - Commands and requests sent as addressed messages
//! - Observing events and replies
//! - Exporting the graph as GraphML and JSON
//!
//! Run with: cargo run --example turnstile
//! Set RUST_LOG=active_machine=debug to see the machine's own logs.

use active_machine::export::{to_graphml, GraphSnapshot};
use active_machine::messages::{Event, Message, MessageKind, Reply};
use active_machine::{trigger_enum, MachineConfig, StateMachine, StateMachineBuilder};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

trigger_enum! {
    enum Turnstile {
        Coin,
        Push,
        Kick,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,active_machine=info")),
        )
        .init();

    println!("=== Turnstile Demo ===\n");

    let fare = Arc::new(AtomicU32::new(0));
    let (paid, collect) = (Arc::clone(&fare), Arc::clone(&fare));

    let mut builder = StateMachineBuilder::new("turnstile").unwrap();
    builder
        .state("Locked", true)
        .unwrap()
        .on(Turnstile::Coin)
        .action("collect-fare", move || {
            collect.fetch_add(1, Ordering::SeqCst);
        })
        .go_to("Unlocked")
        .unwrap()
        .on(Turnstile::Kick)
        .go_to("Broken")
        .unwrap();
    builder
        .state("Unlocked", false)
        .unwrap()
        .on_enter("green-light", || println!("  [light] green"))
        .on(Turnstile::Push)
        .when("fare-paid", move || paid.load(Ordering::SeqCst) > 0)
        .go_to("Locked")
        .unwrap();
    builder
        .state("Broken", false)
        .unwrap()
        .on_enter("call-service", || println!("  [alarm] service requested"))
        .as_terminal();

    let graph = builder.build().unwrap();
    println!("GraphML:\n{}", to_graphml("turnstile", &graph));
    println!(
        "Snapshot:\n{}\n",
        GraphSnapshot::from(&graph).to_json().unwrap()
    );

    let machine = StateMachine::new("turnstile", graph, MachineConfig::default()).unwrap();
    let _subscription = machine.subscribe(|message: &Message<Turnstile>| match message.kind() {
        MessageKind::Event(Event::Info) => {
            println!("  event: {}", message.message_info())
        }
        MessageKind::Event(event) => println!("  event: {}", event.name()),
        MessageKind::Reply(Reply::StateHistory(history)) => {
            println!("  reply to {}: {}", message.target(), history.join(" -> "))
        }
        MessageKind::Reply(reply) => {
            println!("  reply to {}: {}", message.target(), reply.name())
        }
        _ => {}
    });

    machine.send(Message::start("operator", "turnstile")).await;
    let triggers = [
        Turnstile::Push,
        Turnstile::Coin,
        Turnstile::Push,
        Turnstile::Coin,
        Turnstile::Push,
        Turnstile::Kick,
    ];
    for trigger in triggers {
        println!("fire {trigger:?}");
        machine.send(Message::fire("operator", "turnstile", trigger)).await;
    }

    machine.complete();
    while !machine.lifecycle().is_final() {
        tokio::task::yield_now().await;
    }

    machine
        .send(Message::get_state_history("operator", "turnstile"))
        .await;

    println!("\nFinal state: {}", machine.current_state().name());
    println!("Fares collected: {}", fare.load(Ordering::SeqCst));
    println!("Lifecycle: {}", machine.lifecycle());
}
