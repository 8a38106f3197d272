use serde::Serialize;
use snake_engine::{
    log, BotController, BotType, Direction, EndReason, SessionRng, SnakeEngine, SnakeSnapshot,
    TickOutcome,
};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::board_view::BoardView;
use crate::runner_config::RunnerConfig;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    /// `None` when the round hit the tick limit.
    pub end_reason: Option<EndReason>,
}

struct AutopilotRequest {
    snapshot: SnakeSnapshot,
    reply: oneshot::Sender<Option<Direction>>,
}

/// Plays one round on `engine`, which must be freshly constructed or reset.
///
/// This task is the only writer. Before every tick the autopilot is asked
/// about the current snapshot and its answer is applied before `advance`,
/// so the same seeds always replay the same round.
pub async fn run_round(
    engine: &mut SnakeEngine,
    round: u32,
    config: &RunnerConfig,
    bot_rng: SessionRng,
) -> RoundSummary {
    let (request_tx, request_rx) = mpsc::channel::<AutopilotRequest>(1);
    let autopilot = tokio::spawn(run_autopilot(config.bot_type, request_rx, bot_rng));

    let mut current_interval = engine.tick_interval();
    let mut ticker = interval_at(Instant::now() + current_interval, current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log!("[round:{}] started, tick interval {:?}", round, current_interval);

    let mut snapshot = engine.snapshot();
    let end_reason = loop {
        if let Some(direction) = request_direction(&request_tx, snapshot).await {
            engine.set_direction(direction);
        }

        ticker.tick().await;
        let outcome = engine.advance();
        snapshot = engine.snapshot();
        if config.render {
            println!("{}\n", BoardView(&snapshot));
        }
        if outcome == TickOutcome::Ate {
            log!("[round:{}] score {} at tick {}", round, snapshot.score, snapshot.tick);
        }

        if let TickOutcome::Ended(reason) = outcome {
            break Some(reason);
        }
        if engine.tick() >= config.max_ticks_per_round {
            log!("[round:{}] tick limit {} reached", round, config.max_ticks_per_round);
            break None;
        }

        let next_interval = engine.tick_interval();
        if next_interval != current_interval {
            current_interval = next_interval;
            ticker = interval_at(Instant::now() + current_interval, current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }
    };

    drop(request_tx);
    if let Err(e) = autopilot.await {
        log!("[round:{}] autopilot task failed: {}", round, e);
    }

    RoundSummary {
        round,
        score: engine.score(),
        length: engine.snake().len(),
        ticks: engine.tick(),
        end_reason,
    }
}

/// `None` when the autopilot keeps the current direction or is gone.
async fn request_direction(
    request_tx: &mpsc::Sender<AutopilotRequest>,
    snapshot: SnakeSnapshot,
) -> Option<Direction> {
    let (reply_tx, reply_rx) = oneshot::channel();
    request_tx
        .send(AutopilotRequest { snapshot, reply: reply_tx })
        .await
        .ok()?;
    reply_rx.await.ok().flatten()
}

async fn run_autopilot(
    bot_type: BotType,
    mut request_rx: mpsc::Receiver<AutopilotRequest>,
    mut rng: SessionRng,
) {
    while let Some(request) = request_rx.recv().await {
        let direction = BotController::calculate_move(bot_type, &request.snapshot, &mut rng)
            .filter(|direction| *direction != request.snapshot.direction);
        let _ = request.reply.send(direction);
    }
}
