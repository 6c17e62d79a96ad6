use std::process::exit;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use indoc::indoc;

use scuffle::ai::{AiPlayerController, ExecutionMode};
use scuffle::core::{
    controller::{CommandSink, GameController},
    event::GameEvent,
    player::{PlayerController, Presenter},
    side::{Side, SideArray},
    state::GameState,
};
use scuffle::engine::{MatchOptions, MatchRunner, StrategyKind};

const USAGE: &str = indoc! {"
    usage: scuffle [red] [blue] [options]

    red, blue                    strategy per seat: greedy | random
                                 (default: greedy random)
    options:
      --mode <sync|background>   how seats compute turns (default: background)
      --seed <n>                 seed for random strategies (default: 17)
      --turn-limit <n>           draw after this many turns (default: 200)
      --watch                    print the board after every turn
"};

/// Prints each resolved turn for one seat's point of view
struct ConsolePresenter {
    board: GameState,
}

impl Presenter for ConsolePresenter {
    fn set_player_state(&mut self, state: &GameState) {
        self.board = state.clone();
        println!("{}", self.board);
    }

    fn visualize_events(&mut self, events: &[GameEvent], _viewer: Side) {
        let handler = scuffle::core::StateHandler::new();
        for event in events {
            println!("  {}", event);
            if let Err(err) = handler.apply_event(&mut self.board, event) {
                log::error!("presenter lost track of the game: {:#}", err);
            }
        }
        println!("{}", self.board);
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        eprint!("{}", USAGE);
        exit(2);
    }
}

fn run() -> Result<()> {
    let mut kinds = SideArray::new(StrategyKind::Greedy, StrategyKind::Random);
    let mut mode = ExecutionMode::Background;
    let mut seed = 17u64;
    let mut options = MatchOptions::default();
    let mut watch = false;
    let mut seats = 0;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mode" => mode = args.next().context("--mode needs a value")?.parse()?,
            "--seed" => seed = args.next().context("--seed needs a value")?.parse()?,
            "--turn-limit" => {
                let value = args.next().context("--turn-limit needs a value")?;
                options.set_option("turnlimit", &value)?;
            }
            "--watch" => watch = true,
            "--help" | "-h" => {
                print!("{}", USAGE);
                return Ok(());
            }
            _ => {
                let kind: StrategyKind = arg.parse()?;
                match seats {
                    0 => kinds[Side::Red] = kind,
                    1 => kinds[Side::Blue] = kind,
                    _ => bail!("too many strategies: {}", arg),
                }
                seats += 1;
            }
        }
    }

    let (controller, records) = GameController::new(GameState::initial());

    let players = SideArray::new(
        seat(Side::Red, kinds[Side::Red], mode, seed, &controller, watch),
        seat(Side::Blue, kinds[Side::Blue], mode, seed + 1, &controller, false),
    );

    let mut runner = MatchRunner::new(controller, records, players, options);
    let result = runner.run();

    if !watch {
        println!("{}", runner.state());
    }
    println!("result {}", result);

    Ok(())
}

fn seat(
    side: Side,
    kind: StrategyKind,
    mode: ExecutionMode,
    seed: u64,
    controller: &Arc<GameController>,
    watch: bool,
) -> Box<dyn PlayerController> {
    let sink: Arc<dyn CommandSink> = Arc::clone(controller) as Arc<dyn CommandSink>;
    let mut player = AiPlayerController::new(side, kind.build(seed), mode, sink);
    if watch {
        player.set_presenter(Box::new(ConsolePresenter { board: GameState::empty() }));
    }
    Box::new(player)
}
