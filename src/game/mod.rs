//! Game session: seats, command dispatch, and the play loop
//!
//! A [`Session`] owns the board and two seats, one per color. It alternates
//! between a setup phase, where every command is accepted, and a playing
//! phase, where each turn is supplied either by a human line of input or by
//! the seated AI. Recoverable problems (bad commands, illegal moves) are
//! reported and play continues; an AI producing an illegal move aborts the
//! session.

pub mod command;

use std::fs;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, BoardUpdate, PieceColor};
use crate::error::GameError;
use crate::search::{random_move, Searcher};
use command::{parse_command, Command};

const HELP_TEXT: &str = "\
Commands (one per line):
  start                resume play from the current position
  clear                reset to the starting position
  auto COLOR           let an AI play COLOR (dumbwhite/dumbblack for random)
  manual COLOR         let a human play COLOR
  seed N               fix the random seed for the dumb AI
  set COLOR LAYOUT     place pieces from LAYOUT with COLOR to move
  load FILE            run the commands in FILE
  dump                 print the current position
  C0R0-C1R1[-C2R2...]  make a move, e.g. c2-c3 or a1-c3-e1
  help                 print this message
  quit                 exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Setup,
    Playing,
}

/// What supplies moves for one color.
pub enum PlayerKind {
    Manual,
    Ai(Searcher),
    Random,
}

/// Where session output goes. Split out so tests can capture it.
pub trait Reporter {
    fn move_msg(&mut self, msg: &str);
    fn err_msg(&mut self, msg: &str);
    fn outcome_msg(&mut self, msg: &str);
}

/// Reporter for the interactive console.
pub struct TextReporter;

impl Reporter for TextReporter {
    fn move_msg(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn err_msg(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn outcome_msg(&mut self, msg: &str) {
        println!("{msg}");
    }
}

pub struct Session {
    board: Board,
    updates: Receiver<BoardUpdate>,
    state: State,
    white: PlayerKind,
    black: PlayerKind,
    rng: StdRng,
    depth: u32,
    display: bool,
    reporter: Box<dyn Reporter>,
    think_time: Duration,
    quitting: bool,
}

impl Session {
    pub fn new(depth: u32, display: bool, reporter: Box<dyn Reporter>) -> Session {
        let mut board = Board::new();
        let updates = board.subscribe();
        Session {
            board,
            updates,
            state: State::Setup,
            white: PlayerKind::Manual,
            black: PlayerKind::Ai(Searcher::new(depth)),
            rng: StdRng::from_os_rng(),
            depth,
            display,
            reporter,
            think_time: Duration::ZERO,
            quitting: false,
        }
    }

    /// Run the session to completion, reading commands from `input`.
    /// End of input is treated as `quit`.
    pub fn run(&mut self, input: &mut dyn BufRead) -> Result<(), GameError> {
        self.do_clear();
        loop {
            while self.state == State::Setup && !self.quitting {
                match self.read_line(input, "qirkat: ")? {
                    Some(line) => self.execute(&line),
                    None => self.quitting = true,
                }
            }
            if self.quitting {
                self.report_think_time();
                return Ok(());
            }
            while self.state == State::Playing && !self.board.game_over() && !self.quitting {
                self.play_turn(input)?;
            }
            if self.state == State::Playing && self.board.game_over() {
                let winner = self.board.whose_move().opposite();
                self.reporter
                    .outcome_msg(&format!("Game over: {winner} wins."));
            }
            self.state = State::Setup;
        }
    }

    /// Parse and apply one input line, reporting recoverable errors.
    fn execute(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match parse_command(line) {
            Ok(cmd) => self.apply(cmd),
            Err(err) => self.reporter.err_msg(&err.to_string()),
        }
    }

    fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Start => self.state = State::Playing,
            Command::Clear => self.do_clear(),
            Command::Auto { color, dumb } => {
                self.state = State::Setup;
                let seat = if dumb {
                    PlayerKind::Random
                } else {
                    PlayerKind::Ai(Searcher::new(self.depth))
                };
                *self.seat_mut(color) = seat;
            }
            Command::Manual { color } => {
                self.state = State::Setup;
                *self.seat_mut(color) = PlayerKind::Manual;
            }
            Command::Seed { seed } => self.rng = StdRng::seed_from_u64(seed),
            Command::Set { color, layout } => {
                self.board.clear();
                if let Err(err) = self.board.set_pieces(&layout, color) {
                    self.reporter.err_msg(&err.to_string());
                }
                self.refresh_display();
            }
            Command::Dump => {
                println!("===");
                println!("{}", self.board);
                println!("===");
            }
            Command::Load { path } => self.load_script(&path),
            Command::Help => println!("{HELP_TEXT}"),
            Command::Quit => self.quitting = true,
            Command::PieceMove(mv) => {
                if let Err(err) = self.board.make_move(&mv) {
                    self.reporter.err_msg(&err.to_string());
                } else {
                    self.refresh_display();
                }
            }
        }
    }

    /// Play one turn for whoever is to move.
    fn play_turn(&mut self, input: &mut dyn BufRead) -> Result<(), GameError> {
        let color = self.board.whose_move();
        if matches!(self.seat(color), PlayerKind::Manual) {
            return self.manual_turn(input, color);
        }
        let start = Instant::now();
        let chosen = {
            let board = &self.board;
            let rng = &mut self.rng;
            let seat = if color == PieceColor::White {
                &mut self.white
            } else {
                &mut self.black
            };
            match seat {
                PlayerKind::Manual => unreachable!("manual seat handled above"),
                PlayerKind::Ai(searcher) => searcher.find_move(board),
                PlayerKind::Random => random_move(board, rng),
            }
        };
        self.think_time += start.elapsed();
        let mv =
            chosen.map_err(|err| GameError::state(format!("something wrong with AI: {err}")))?;
        self.reporter.move_msg(&format!("{color} moves {mv}."));
        self.board
            .make_move(&mv)
            .map_err(|err| GameError::state(format!("something wrong with AI: {err}")))?;
        self.refresh_display();
        Ok(())
    }

    fn manual_turn(
        &mut self,
        input: &mut dyn BufRead,
        color: PieceColor,
    ) -> Result<(), GameError> {
        let prompt = format!("{color}: ");
        match self.read_line(input, &prompt)? {
            Some(line) => self.execute(&line),
            None => self.quitting = true,
        }
        Ok(())
    }

    fn load_script(&mut self, path: &str) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                self.reporter
                    .err_msg(&format!("cannot open file {path}"));
                return;
            }
        };
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        for line in lines {
            self.execute(&line);
        }
    }

    fn do_clear(&mut self) {
        self.board.clear();
        self.white = PlayerKind::Manual;
        self.black = PlayerKind::Ai(Searcher::new(self.depth));
        self.state = State::Setup;
        self.refresh_display();
    }

    /// Drain pending board updates, showing the latest when display is on.
    fn refresh_display(&mut self) {
        let mut last = None;
        while let Ok(update) = self.updates.try_recv() {
            last = Some(update);
        }
        if self.display {
            if let Some(update) = last {
                println!("{}", update.text);
            }
        }
    }

    fn report_think_time(&mut self) {
        if self.think_time > Duration::ZERO {
            self.reporter.outcome_msg(&format!(
                "Total AI thinking time: {:.3} sec.",
                self.think_time.as_secs_f64()
            ));
        }
    }

    fn read_line(
        &mut self,
        input: &mut dyn BufRead,
        prompt: &str,
    ) -> Result<Option<String>, GameError> {
        print!("{prompt}");
        io::stdout()
            .flush()
            .map_err(|err| GameError::state(format!("cannot write to terminal: {err}")))?;
        let mut line = String::new();
        let n = input
            .read_line(&mut line)
            .map_err(|err| GameError::state(format!("cannot read input: {err}")))?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    fn seat(&self, color: PieceColor) -> &PlayerKind {
        if color == PieceColor::White {
            &self.white
        } else {
            &self.black
        }
    }

    fn seat_mut(&mut self, color: PieceColor) -> &mut PlayerKind {
        if color == PieceColor::White {
            &mut self.white
        } else {
            &mut self.black
        }
    }
}
