use serde_json::{Value, json};

use dianti::api::{Action, Command, Direction, SimulationClient, SimulationState};
use dianti::bots::{RandomBot, TurnContext, UpDownBot, from_fn};
use dianti::driver::play;
use dianti::error::ApiError;
use dianti::observability::{NoopObserver, ObserverEvent};

use crate::sim_harness::{RecordingObserver, api_url, json_server, registration, request_bodies};

fn running(elevators: &[Value]) -> Value {
    json!({"running": true, "elevators": elevators, "errors": []})
}

#[tokio::test]
async fn two_elevators_then_final_score() {
    let server = json_server(vec![
        json!({
            "token": "abc",
            "num_floors": 5,
            "running": true,
            "elevators": [{"id": 1}, {"id": 2}],
            "errors": []
        }),
        json!({"running": false, "score": 42, "replay_url": "http://x/y", "errors": []}),
    ])
    .await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut bot = RandomBot::seeded(11);

    let outcome = play(&mut client, &registration(), &mut bot, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(outcome.turns, 1);
    assert_eq!(outcome.score, Some(42.0));
    assert_eq!(outcome.replay_url.as_deref(), Some("http://x/y"));
    assert!(outcome.final_errors.is_empty());

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    let commands = bodies[1]["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0]["elevator_id"], json!(1));
    assert_eq!(commands[1]["elevator_id"], json!(2));
    for command in commands {
        assert!(command["direction"].is_boolean());
        assert!(command["action"].is_boolean());
    }
}

#[tokio::test]
async fn sends_one_fewer_turn_than_responses() {
    for responses in 1..=6_usize {
        let mut replies = Vec::new();
        for i in 0..responses {
            let last = i + 1 == responses;
            let mut reply = json!({
                "running": !last,
                "elevators": [{"id": "elevator-0"}, {"id": "elevator-1"}],
                "errors": []
            });
            if i == 0 {
                reply["token"] = json!("abc");
                reply["num_floors"] = json!(10);
            }
            replies.push(reply);
        }
        let server = json_server(replies).await;
        let mut client = SimulationClient::new(&api_url(&server));
        let mut bot = RandomBot::seeded(responses as u64);

        let outcome = play(&mut client, &registration(), &mut bot, &NoopObserver)
            .await
            .unwrap();

        let bodies = request_bodies(&server).await;
        assert_eq!(bodies.len(), responses, "responses = {responses}");
        assert_eq!(outcome.turns as usize, responses - 1);
        for body in &bodies[1..] {
            assert_eq!(body["commands"].as_array().unwrap().len(), 2);
        }
    }
}

#[tokio::test]
async fn simulation_errors_are_surfaced_and_the_loop_continues() {
    let elevators = [json!({"id": "elevator-0"})];
    let server = json_server(vec![
        json!({"token": "abc", "num_floors": 5, "running": true, "elevators": elevators, "errors": []}),
        json!({"running": true, "elevators": elevators, "errors": ["elevator 3 not found"]}),
        running(&elevators),
        json!({"running": false, "score": 7, "errors": []}),
    ])
    .await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut bot = RandomBot::seeded(5);
    let observer = RecordingObserver::default();

    let outcome = play(&mut client, &registration(), &mut bot, &observer)
        .await
        .unwrap();

    assert_eq!(outcome.turns, 3);
    assert_eq!(outcome.errors_seen, 1);
    assert_eq!(request_bodies(&server).await.len(), 4);

    let turn_errors: Vec<usize> = observer
        .events()
        .iter()
        .filter_map(|event| match event {
            ObserverEvent::TurnCompleted { errors, .. } => Some(*errors),
            _ => None,
        })
        .collect();
    assert_eq!(turn_errors, vec![1, 0, 0]);
}

#[tokio::test]
async fn terminal_errors_are_reported_next_to_the_score() {
    let server = json_server(vec![
        json!({"token": "abc", "num_floors": 5, "running": true, "elevators": [{"id": "e"}]}),
        json!({
            "running": false,
            "score": -20,
            "replay_url": "http://x/z",
            "errors": ["elevator e is moving"]
        }),
    ])
    .await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut bot = RandomBot::seeded(9);

    let outcome = play(&mut client, &registration(), &mut bot, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(outcome.score, Some(-20.0));
    assert_eq!(outcome.replay_url.as_deref(), Some("http://x/z"));
    assert_eq!(outcome.final_errors, vec!["elevator e is moving".to_string()]);
}

#[tokio::test]
async fn missing_score_and_replay_are_not_errors() {
    let server = json_server(vec![
        json!({"token": "abc", "num_floors": 5, "running": true, "elevators": []}),
        json!({"running": false}),
    ])
    .await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut bot = RandomBot::seeded(1);

    let outcome = play(&mut client, &registration(), &mut bot, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(outcome.score, None);
    assert_eq!(outcome.replay_url, None);
}

#[tokio::test]
async fn transport_failure_aborts_the_run() {
    // Second turn hits the exhausted script and gets a 500.
    let server = json_server(vec![
        json!({"token": "abc", "num_floors": 5, "running": true, "elevators": [{"id": "e"}]}),
        running(&[json!({"id": "e"})]),
    ])
    .await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut bot = RandomBot::seeded(2);

    let err = play(&mut client, &registration(), &mut bot, &NoopObserver)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(request_bodies(&server).await.len(), 3);
}

#[tokio::test]
async fn policies_see_turn_numbers_and_floor_count() {
    let elevators = [json!({"id": "elevator-0", "floor": 1})];
    let server = json_server(vec![
        json!({"token": "abc", "num_floors": 8, "running": true, "elevators": elevators}),
        running(&elevators),
        running(&elevators),
        json!({"running": false}),
    ])
    .await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut seen = Vec::new();
    let mut policy = from_fn("recorder", |state: &SimulationState, ctx: TurnContext| {
        seen.push(ctx);
        state
            .elevators
            .iter()
            .map(|e| Command::new(e.id.clone(), Direction::Up, Action::Stop))
            .collect()
    });

    play(&mut client, &registration(), &mut policy, &NoopObserver)
        .await
        .unwrap();
    drop(policy);

    assert_eq!(
        seen,
        (1..=3)
            .map(|turn| TurnContext {
                num_floors: 8,
                turn
            })
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn updown_bot_plays_against_the_server() {
    let server = json_server(vec![
        json!({
            "token": "abc",
            "num_floors": 3,
            "running": true,
            "elevators": [{"id": "elevator-0", "floor": 3, "buttons_pressed": []}],
            "requests": [{"floor": 3, "direction": false}]
        }),
        json!({"running": false, "score": 80}),
    ])
    .await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut bot = UpDownBot::new();

    let outcome = play(&mut client, &registration(), &mut bot, &NoopObserver)
        .await
        .unwrap();

    assert_eq!(outcome.score, Some(80.0));
    let bodies = request_bodies(&server).await;
    assert_eq!(
        bodies[1]["commands"],
        json!([{"elevator_id": "elevator-0", "direction": false, "action": false}])
    );
}

#[tokio::test]
async fn observer_sees_start_turns_and_end_in_order() {
    let elevators = [json!({"id": "e"})];
    let server = json_server(vec![
        json!({"token": "abc", "num_floors": 5, "running": true, "elevators": elevators}),
        running(&elevators),
        json!({"running": false, "score": 3}),
    ])
    .await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut bot = RandomBot::seeded(4);
    let observer = RecordingObserver::default();

    play(&mut client, &registration(), &mut bot, &observer)
        .await
        .unwrap();

    let events = observer.events();
    assert_eq!(events.len(), 4);
    assert!(matches!(
        &events[0],
        ObserverEvent::SimulationStart { policy, sandbox: true, .. } if policy == "random"
    ));
    assert!(matches!(events[1], ObserverEvent::TurnCompleted { turn: 1, commands: 1, .. }));
    assert!(matches!(events[2], ObserverEvent::TurnCompleted { turn: 2, commands: 1, .. }));
    assert!(matches!(
        events[3],
        ObserverEvent::SimulationEnd { turns: 2, score: Some(s), .. } if (s - 3.0).abs() < f64::EPSILON
    ));
}

#[tokio::test]
async fn failed_start_records_no_events() {
    // Empty script: the start call gets a 500.
    let server = json_server(Vec::new()).await;
    let mut client = SimulationClient::new(&api_url(&server));
    let mut bot = RandomBot::seeded(6);
    let observer = RecordingObserver::default();

    let err = play(&mut client, &registration(), &mut bot, &observer)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert!(observer.events().is_empty());
}
