//! End-to-end shop workflow: creation, ordering, payment, and the signal
//! contract a dispatcher builds on.

use entity_machine::{
    behavior, event_enum, unchanged, BehaviorError, Entity, EntityStateMachine, Snapshot,
    StateMachineBuilder, StateMachineDefinition,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

event_enum! {
    pub enum BasketEvent kinds BasketEventKind {
        Create { customer: String },
        PlaceOrder { address: String },
        ConfirmPayment,
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Basket {
    id: String,
    customer: Option<String>,
    address: Option<String>,
    paid: bool,
}

impl Entity for Basket {
    type Id = String;
    type Event = BasketEvent;

    fn id(&self) -> &String {
        &self.id
    }
}

event_enum! {
    pub enum ShipmentEvent kinds ShipmentEventKind {
        Prepare { basket: String, address: String },
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Shipment {
    id: String,
    basket: Option<String>,
}

impl Entity for Shipment {
    type Id = String;
    type Event = ShipmentEvent;

    fn id(&self) -> &String {
        &self.id
    }
}

fn empty_basket(id: &str) -> Basket {
    Basket {
        id: id.to_string(),
        customer: None,
        address: None,
        paid: false,
    }
}

/// Basket graph: Initial -> Created -> Ordered -> Paid.
///
/// Creation records the customer and immediately asks for a default order to
/// be placed (a self-signal); payment hands the order off to a shipment
/// entity (an other-signal).
fn basket_definition() -> Arc<StateMachineDefinition<Basket>> {
    let mut builder = StateMachineBuilder::<Basket>::new();
    let created = builder.state("Created", BasketEventKind::Create).unwrap();
    let ordered = builder
        .state("Ordered", BasketEventKind::PlaceOrder)
        .unwrap();
    let paid = builder
        .state("Paid", BasketEventKind::ConfirmPayment)
        .unwrap();

    builder
        .initial_transition(
            &created,
            behavior(|basket: &Basket, event, signals| {
                let customer = match event {
                    BasketEvent::Create { customer } => customer.clone(),
                    _ => return Err(BehaviorError::new("unexpected event")),
                };
                signals.to_self(BasketEvent::PlaceOrder {
                    address: "on file".to_string(),
                });
                Ok(Basket {
                    customer: Some(customer),
                    ..basket.clone()
                })
            }),
        )
        .unwrap();
    builder
        .transition(
            &created,
            &ordered,
            behavior(|basket: &Basket, event, _signals| {
                let address = match event {
                    BasketEvent::PlaceOrder { address } => address.clone(),
                    _ => return Err(BehaviorError::new("unexpected event")),
                };
                Ok(Basket {
                    address: Some(address),
                    ..basket.clone()
                })
            }),
        )
        .unwrap();
    builder
        .transition(
            &ordered,
            &paid,
            behavior(|basket: &Basket, _event, signals| {
                let address = basket.address.clone().unwrap_or_default();
                signals.to_entity::<Shipment>(
                    &format!("shipment-{}", basket.id),
                    ShipmentEvent::Prepare {
                        basket: basket.id.clone(),
                        address,
                    },
                )?;
                Ok(Basket {
                    paid: true,
                    ..basket.clone()
                })
            }),
        )
        .unwrap();
    Arc::new(builder.build().unwrap())
}

fn shipment_definition() -> Arc<StateMachineDefinition<Shipment>> {
    let mut builder = StateMachineBuilder::<Shipment>::new();
    let prepared = builder
        .state("Prepared", ShipmentEventKind::Prepare)
        .unwrap();
    builder
        .initial_transition(
            &prepared,
            behavior(|shipment: &Shipment, event, _signals| {
                let basket = match event {
                    ShipmentEvent::Prepare { basket, .. } => basket.clone(),
                };
                Ok(Shipment {
                    basket: Some(basket),
                    ..shipment.clone()
                })
            }),
        )
        .unwrap();
    Arc::new(builder.build().unwrap())
}

#[test]
fn declared_transitions_advance_the_basket() {
    let definition = basket_definition();
    let machine =
        EntityStateMachine::restore(definition, empty_basket("b-1"), "Created").unwrap();

    let machine = machine
        .event(BasketEvent::PlaceOrder {
            address: "1 Main St".to_string(),
        })
        .unwrap();

    assert!(machine.transition_occurred());
    assert_eq!(machine.state().name(), "Ordered");
    assert_eq!(machine.entity().address.as_deref(), Some("1 Main St"));
}

#[test]
fn undeclared_events_are_noops_in_every_state() {
    let definition = basket_definition();
    let machine = EntityStateMachine::restore(
        Arc::clone(&definition),
        empty_basket("b-1"),
        "Created",
    )
    .unwrap();

    // No transition from Created on ConfirmPayment is declared.
    let next = machine.event(BasketEvent::ConfirmPayment).unwrap();
    assert!(!next.transition_occurred());
    assert_eq!(next.state().name(), "Created");
    assert_eq!(next.entity(), machine.entity());

    // Create only enters Created from the initial state.
    let next = machine
        .event(BasketEvent::Create {
            customer: "Ada".to_string(),
        })
        .unwrap();
    assert!(!next.transition_occurred());
}

#[test]
fn creation_chain_drains_self_signals() {
    let definition = basket_definition();
    let mut machine =
        EntityStateMachine::new(Arc::clone(&definition), empty_basket("b-2"));

    // The dispatcher applies the creation event, then keeps re-enqueueing
    // self-signals against the same entity until the chain settles.
    let mut queue = vec![BasketEvent::Create {
        customer: "Ada".to_string(),
    }];
    let mut hops = 0;
    while let Some(event) = queue.pop() {
        machine = machine.event(event).unwrap();
        queue.extend(machine.signals_to_self().iter().map(|s| s.event().clone()));
        hops += 1;
        assert!(hops < 10, "self-signal chain did not settle");
    }

    assert_eq!(machine.state().name(), "Ordered");
    assert_eq!(machine.entity().customer.as_deref(), Some("Ada"));
    assert_eq!(machine.entity().address.as_deref(), Some("on file"));
    assert_eq!(machine.log().path(), vec!["Initial", "Created", "Ordered"]);
}

#[test]
fn payment_signals_a_shipment_entity() {
    let basket_machine = EntityStateMachine::restore(
        basket_definition(),
        Basket {
            id: "b-3".to_string(),
            customer: Some("Ada".to_string()),
            address: Some("1 Main St".to_string()),
            paid: false,
        },
        "Ordered",
    )
    .unwrap();

    let basket_machine = basket_machine.event(BasketEvent::ConfirmPayment).unwrap();
    assert!(basket_machine.transition_occurred());
    assert!(basket_machine.entity().paid);
    assert!(basket_machine.signals_to_self().is_empty());
    assert_eq!(basket_machine.signals_to_other().len(), 1);

    // The dispatcher routes the envelope to the shipment's mailbox.
    let outbound = &basket_machine.signals_to_other()[0];
    let target = outbound.target().unwrap();
    assert!(target.entity_type().contains("Shipment"));
    assert_eq!(target.id(), "shipment-b-3");

    let event = outbound
        .event()
        .downcast::<ShipmentEvent>()
        .expect("payload is a shipment event")
        .clone();

    let shipment = Shipment {
        id: target.id().to_string(),
        basket: None,
    };
    let shipment_machine = EntityStateMachine::new(shipment_definition(), shipment);
    let shipment_machine = shipment_machine.event(event).unwrap();

    assert!(shipment_machine.transition_occurred());
    assert_eq!(shipment_machine.state().name(), "Prepared");
    assert_eq!(
        shipment_machine.entity().basket.as_deref(),
        Some("b-3")
    );
}

#[test]
fn snapshots_survive_a_simulated_restart() {
    let definition = basket_definition();
    let machine = EntityStateMachine::new(Arc::clone(&definition), empty_basket("b-4"));
    let machine = machine
        .event(BasketEvent::Create {
            customer: "Ada".to_string(),
        })
        .unwrap();

    // Persist, "restart", reload.
    let bytes = machine.snapshot().to_bytes().unwrap();
    let snapshot = Snapshot::<Basket>::from_bytes(&bytes).unwrap();
    let restored = EntityStateMachine::from_snapshot(definition, snapshot).unwrap();

    assert_eq!(restored.state().name(), "Created");
    assert_eq!(restored.entity(), machine.entity());
    assert_eq!(restored.log().path(), vec!["Initial", "Created"]);

    let restored = restored
        .event(BasketEvent::PlaceOrder {
            address: "1 Main St".to_string(),
        })
        .unwrap();
    assert_eq!(restored.state().name(), "Ordered");
    assert_eq!(
        restored.log().path(),
        vec!["Initial", "Created", "Ordered"]
    );
}

#[test]
fn definition_projections_describe_the_declared_graph() {
    let definition = basket_definition();

    assert!(definition.has_creation_transition());
    let created = definition.state_named("Created").unwrap();
    assert!(definition.is_creation_destination(created));

    let graphml = definition.graphml();
    for state in ["Initial", "Created", "Ordered", "Paid"] {
        assert!(graphml.contains(&format!("<node id=\"{state}\">")));
    }
    assert!(graphml.contains("<edge source=\"Ordered\" target=\"Paid\"/>"));

    let html = definition.documentation_html();
    assert!(html.contains("<i>PlaceOrder</i>"));
    assert!(html.contains("<b>Paid</b>"));
}

#[test]
fn unchanged_behavior_supports_pass_through_edges() {
    let mut builder = StateMachineBuilder::<Shipment>::new();
    let prepared = builder
        .state("Prepared", ShipmentEventKind::Prepare)
        .unwrap();
    builder.initial_transition(&prepared, unchanged()).unwrap();
    let definition = Arc::new(builder.build().unwrap());

    let shipment = Shipment {
        id: "s-1".to_string(),
        basket: None,
    };
    let machine = EntityStateMachine::new(definition, shipment.clone());
    let machine = machine
        .event(ShipmentEvent::Prepare {
            basket: "b-1".to_string(),
            address: "1 Main St".to_string(),
        })
        .unwrap();

    assert!(machine.transition_occurred());
    assert_eq!(machine.entity(), &shipment);
}
