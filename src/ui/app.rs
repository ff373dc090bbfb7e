use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{error, info};
use ratatui::{Terminal, backend::Backend};

use super::game_view::{self, PlayView};
use super::menu_view;
use crate::ai::Tier;
use crate::game::tictactoe::{self, CENTER};
use crate::game::{
    BoardGame, CENTER_COL, COLS, Choice, Coord, GameKind, MoveError, Outcome, Player,
};
use crate::session::Session;

const MAIN_MENU: [&str; 5] = [
    "Tic-Tac-Toe",
    "Rock Paper Scissors",
    "Connect 4",
    "Settings",
    "Quit",
];
const SETTINGS_MENU: [&str; 2] = ["Reset RPS AI", "Back"];
/// Shown on entering settings. Tic-Tac-Toe and Connect 4 keep no learned table.
const SETTINGS_NOTE: &str =
    "Only the Rock Paper Scissors RL opponent learns, so its table is the one to reset.";

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    MainMenu,
    Settings,
    ModeSelect(GameKind),
    Playing(GameKind, Tier),
}

pub struct App {
    session: Session,
    scene: Scene,
    /// Menu entry under the cursor.
    selected: usize,
    /// Cell, column, or choice under the cursor while playing.
    cursor: usize,
    /// Tier each game was last entered with.
    tiers: HashMap<GameKind, Tier>,
    /// Difficulty highlighted when a mode-select menu opens.
    preferred_tier: Tier,
    /// Result of each game's latest move, kept across scene changes.
    outcomes: HashMap<GameKind, Outcome>,
    message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            scene: Scene::MainMenu,
            selected: 0,
            cursor: 0,
            tiers: HashMap::new(),
            preferred_tier: Tier::Naive,
            outcomes: HashMap::new(),
            message: None,
            should_quit: false,
        }
    }

    /// Open each game's difficulty menu on `tier` when the game offers it.
    pub fn with_preferred_tier(mut self, tier: Tier) -> Self {
        self.preferred_tier = tier;
        self
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Hand the session back for closing.
    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Cells of the winning line shown on the current play scene, if any.
    pub fn highlighted_line(&self) -> &[Coord] {
        match self.scene {
            Scene::Playing(kind, _) => self.outcomes.get(&kind).map_or(&[][..], Outcome::line),
            _ => &[],
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        // Clear message on any key press
        self.message = None;

        match self.scene {
            Scene::MainMenu => self.main_menu_key(key.code),
            Scene::Settings => self.settings_key(key.code),
            Scene::ModeSelect(kind) => self.mode_select_key(kind, key.code),
            Scene::Playing(kind, tier) => self.play_key(kind, tier, key.code),
        }
    }

    fn goto(&mut self, scene: Scene, selected: usize) {
        self.scene = scene;
        self.selected = selected;
    }

    /// Move the menu cursor, or return the entry picked by Enter or a digit.
    fn menu_pick(&mut self, code: KeyCode, len: usize) -> Option<usize> {
        match code {
            KeyCode::Up => {
                self.selected = (self.selected + len - 1) % len;
                None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % len;
                None
            }
            KeyCode::Enter => Some(self.selected),
            KeyCode::Char(c) => digit(c).filter(|&d| (1..=len).contains(&d)).map(|d| d - 1),
            _ => None,
        }
    }

    fn main_menu_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
            return;
        }
        match self.menu_pick(code, MAIN_MENU.len()) {
            Some(i) if i < GameKind::ALL.len() => {
                let kind = GameKind::ALL[i];
                let selected = kind
                    .tiers()
                    .iter()
                    .position(|&t| t == self.preferred_tier)
                    .unwrap_or(0);
                self.goto(Scene::ModeSelect(kind), selected);
            }
            Some(3) => {
                self.goto(Scene::Settings, 0);
                self.message = Some(SETTINGS_NOTE.to_string());
            }
            Some(_) => self.should_quit = true,
            None => {}
        }
    }

    fn settings_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.goto(Scene::MainMenu, 3);
            return;
        }
        match self.menu_pick(code, SETTINGS_MENU.len()) {
            Some(0) => {
                self.message = Some(match self.session.reset_learning() {
                    Ok(()) => "RPS Q-table has been reset.".to_string(),
                    Err(e) => {
                        error!("{e}");
                        format!("Error resetting Q-table: {e}")
                    }
                });
            }
            Some(_) => self.goto(Scene::MainMenu, 3),
            None => {}
        }
    }

    fn mode_select_key(&mut self, kind: GameKind, code: KeyCode) {
        let back_to_menu = GameKind::ALL.iter().position(|&k| k == kind).unwrap_or(0);
        if code == KeyCode::Esc {
            self.goto(Scene::MainMenu, back_to_menu);
            return;
        }
        let tiers = kind.tiers();
        match self.menu_pick(code, tiers.len() + 1) {
            Some(i) if i < tiers.len() => self.enter_game(kind, tiers[i]),
            Some(_) => self.goto(Scene::MainMenu, back_to_menu),
            None => {}
        }
    }

    /// Start playing `kind` at `tier`. A different tier than last time starts
    /// that game over.
    fn enter_game(&mut self, kind: GameKind, tier: Tier) {
        if self.tiers.insert(kind, tier) != Some(tier) {
            info!("starting {} at {} difficulty", kind.title(), tier.name());
            self.reset_game(kind);
        }
        self.cursor = match kind {
            GameKind::TicTacToe => CENTER,
            GameKind::ConnectFour => CENTER_COL,
            GameKind::RockPaperScissors => 0,
        };
        self.scene = Scene::Playing(kind, tier);
    }

    fn reset_game(&mut self, kind: GameKind) {
        match kind {
            GameKind::TicTacToe => self.session.tictactoe_mut().reset(),
            GameKind::ConnectFour => self.session.connect_four_mut().reset(),
            GameKind::RockPaperScissors => self.session.rps_mut().reset(),
        }
        self.outcomes.remove(&kind);
    }

    fn play_key(&mut self, kind: GameKind, tier: Tier, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                let selected = kind.tiers().iter().position(|&t| t == tier).unwrap_or(0);
                self.goto(Scene::ModeSelect(kind), selected);
                return;
            }
            KeyCode::Char('r') => {
                self.reset_game(kind);
                self.message = Some("New game started!".to_string());
                return;
            }
            _ => {}
        }

        match kind {
            GameKind::TicTacToe => self.tictactoe_key(kind, tier, code),
            GameKind::ConnectFour => self.connect_four_key(kind, tier, code),
            GameKind::RockPaperScissors => self.rps_key(tier, code),
        }
    }

    fn tictactoe_key(&mut self, kind: GameKind, tier: Tier, code: KeyCode) {
        let (row, col) = (self.cursor / 3, self.cursor % 3);
        match code {
            KeyCode::Left if col > 0 => self.cursor -= 1,
            KeyCode::Right if col < 2 => self.cursor += 1,
            KeyCode::Up if row > 0 => self.cursor -= 3,
            KeyCode::Down if row < 2 => self.cursor += 3,
            KeyCode::Enter | KeyCode::Char(' ') => {
                let result = human_turn(self.session.tictactoe_mut(), self.cursor, tier);
                self.finish_turn(kind, result);
            }
            KeyCode::Char(c) => {
                if let Some(d) = digit(c).filter(|&d| (1..=tictactoe::CELLS).contains(&d)) {
                    self.cursor = d - 1;
                    let result = human_turn(self.session.tictactoe_mut(), self.cursor, tier);
                    self.finish_turn(kind, result);
                }
            }
            _ => {}
        }
    }

    fn connect_four_key(&mut self, kind: GameKind, tier: Tier, code: KeyCode) {
        match code {
            KeyCode::Left if self.cursor > 0 => self.cursor -= 1,
            KeyCode::Right if self.cursor < COLS - 1 => self.cursor += 1,
            KeyCode::Enter | KeyCode::Char(' ') => {
                let result = human_turn(self.session.connect_four_mut(), self.cursor, tier);
                self.finish_turn(kind, result);
            }
            KeyCode::Char(c) => {
                if let Some(d) = digit(c).filter(|&d| (1..=COLS).contains(&d)) {
                    self.cursor = d - 1;
                    let result = human_turn(self.session.connect_four_mut(), self.cursor, tier);
                    self.finish_turn(kind, result);
                }
            }
            _ => {}
        }
    }

    fn rps_key(&mut self, tier: Tier, code: KeyCode) {
        let len = Choice::ALL.len();
        let choice = match code {
            KeyCode::Left => {
                self.cursor = (self.cursor + len - 1) % len;
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1) % len;
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Choice::ALL[self.cursor % len]),
            KeyCode::Char(c) => digit(c)
                .filter(|&d| (1..=len).contains(&d))
                .map(|d| {
                    self.cursor = d - 1;
                    Choice::ALL[d - 1]
                }),
            _ => None,
        };
        if let Some(choice) = choice {
            let round = self.session.rps_mut().play(choice, tier);
            self.message = Some(round.summary());
        }
    }

    fn finish_turn(&mut self, kind: GameKind, result: Result<Outcome, MoveError>) {
        match result {
            Ok(outcome) => {
                self.message = match outcome.winner() {
                    Some(Player::HUMAN) => Some("You win!".to_string()),
                    Some(_) => Some("AI wins!".to_string()),
                    None if outcome == Outcome::Draw => Some("It's a draw!".to_string()),
                    None => None,
                };
                self.outcomes.insert(kind, outcome);
            }
            Err(e) => self.message = Some(format!("Invalid move: {e}")),
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        match self.scene {
            Scene::MainMenu => menu_view::render(
                frame,
                "AI Game Suite",
                &MAIN_MENU,
                self.selected,
                &self.message,
                "↑/↓: Move  |  Enter/1-5: Select  |  Q: Quit",
            ),
            Scene::Settings => menu_view::render(
                frame,
                "Settings",
                &SETTINGS_MENU,
                self.selected,
                &self.message,
                "↑/↓: Move  |  Enter: Select  |  Esc: Back",
            ),
            Scene::ModeSelect(kind) => {
                let mut items: Vec<&str> =
                    kind.tiers().iter().map(|&t| kind.tier_label(t)).collect();
                items.push("Back");
                menu_view::render(
                    frame,
                    kind.title(),
                    &items,
                    self.selected,
                    &self.message,
                    "↑/↓: Move  |  Enter: Select  |  Esc: Back",
                );
            }
            Scene::Playing(kind, tier) => game_view::render(
                frame,
                &PlayView {
                    session: &self.session,
                    kind,
                    tier,
                    cursor: self.cursor,
                    line: self.highlighted_line(),
                    message: &self.message,
                },
            ),
        }
    }
}

/// The human moves, then the AI answers unless that move ended the round.
/// A move on a finished round opens a new one first.
pub fn human_turn<G: BoardGame>(
    game: &mut G,
    mv: G::Move,
    tier: Tier,
) -> Result<Outcome, MoveError> {
    if game.is_over() {
        game.new_round();
    }
    let outcome = game.play(mv)?;
    if outcome.is_terminal() {
        return Ok(outcome);
    }
    match game.ai_move(tier) {
        Some(reply) => game.play(reply),
        None => Ok(outcome),
    }
}

fn digit(c: char) -> Option<usize> {
    c.to_digit(10).map(|d| d as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::game::{Cell, TicTacToe};
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn new_app() -> (App, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.persistence.dir = dir.path().to_path_buf();
        (App::new(Session::open(&config, Some(5))), dir)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_menu_navigation() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.scene(), Scene::ModeSelect(GameKind::RockPaperScissors));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.scene(), Scene::MainMenu);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.scene(), Scene::ModeSelect(GameKind::ConnectFour));

        // Naive, Biased, then Back
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.scene(), Scene::MainMenu);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.scene(), Scene::ModeSelect(GameKind::RockPaperScissors));
    }

    #[test]
    fn test_quit_from_main_menu() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('5'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_tictactoe_move_gets_minimax_reply() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.scene(), Scene::Playing(GameKind::TicTacToe, Tier::Minimax));

        press(&mut app, KeyCode::Char('1'));
        let board = app.session().tictactoe().board();
        assert_eq!(board.get(0), Cell::One);
        assert_eq!(board.get(4), Cell::Two);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.message(), Some("Invalid move: cell 0 is already taken"));
    }

    #[test]
    fn test_escape_returns_to_mode_select() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(
            app.scene(),
            Scene::Playing(GameKind::RockPaperScissors, Tier::Biased)
        );
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.scene(), Scene::ModeSelect(GameKind::RockPaperScissors));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.scene(), Scene::MainMenu);
    }

    #[test]
    fn test_rps_round_reports_summary() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('1'));

        let history = app.session().rps().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].player, Choice::Rock);
        assert_eq!(app.message(), Some(history[0].summary().as_str()));
        assert_eq!(app.session().rps().state().to_string(), "start,rock");
    }

    #[test]
    fn test_changing_tier_resets_game() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('1'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.session().rps().history().len(), 3);

        // Same tier again keeps the game.
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.session().rps().history().len(), 3);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('2'));
        assert!(app.session().rps().history().is_empty());
    }

    #[test]
    fn test_settings_reset_learning() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('2'));
        assert!(!app.session().rps().learner().table().is_empty());

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.scene(), Scene::Settings);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("RPS Q-table has been reset."));
        assert!(app.session().rps().learner().table().is_empty());
    }

    #[test]
    fn test_settings_names_the_learned_table() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.scene(), Scene::Settings);
        assert_eq!(app.message(), Some(SETTINGS_NOTE));
        assert_eq!(SETTINGS_MENU, ["Reset RPS AI", "Back"]);
    }

    #[test]
    fn test_winning_line_survives_reentry_at_same_tier() {
        let (mut app, _dir) = new_app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('3'));
        // X on 0, 1, 3 while minimax takes 4, 2, then wins through 6.
        for key in ['1', '2', '4'] {
            press(&mut app, KeyCode::Char(key));
        }
        assert_eq!(app.message(), Some("AI wins!"));
        assert_eq!(app.highlighted_line().len(), 3);

        press(&mut app, KeyCode::Esc);
        assert!(app.highlighted_line().is_empty());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.scene(), Scene::Playing(GameKind::TicTacToe, Tier::Minimax));
        assert_eq!(app.highlighted_line().len(), 3);

        // Another game has its own, empty, outcome.
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('1'));
        assert!(app.highlighted_line().is_empty());

        // A tier change starts Tic-Tac-Toe over.
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        assert!(app.highlighted_line().is_empty());
    }

    #[test]
    fn test_preferred_tier_opens_mode_select_on_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.persistence.dir = dir.path().to_path_buf();
        let session = Session::open(&config, Some(5));
        let mut app = App::new(session).with_preferred_tier(Tier::from_name_or_naive("minimax"));

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.scene(), Scene::Playing(GameKind::TicTacToe, Tier::Minimax));

        // Connect 4 has no minimax tier, so its menu opens on the first entry.
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.scene(), Scene::Playing(GameKind::ConnectFour, Tier::Naive));
    }

    #[test]
    fn test_unknown_preferred_tier_falls_back_to_naive() {
        let (app, _dir) = new_app();
        let mut app = App::new(app.into_session())
            .with_preferred_tier(Tier::from_name_or_naive("grandmaster"));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.scene(),
            Scene::Playing(GameKind::RockPaperScissors, Tier::Naive)
        );
    }

    #[test]
    fn test_move_after_round_end_starts_new_round() {
        let mut game = TicTacToe::with_seed(0);
        while !game.is_over() {
            let mv = game.legal_moves()[0];
            human_turn(&mut game, mv, Tier::Naive).unwrap();
        }
        let score = game.score();
        let outcome = human_turn(&mut game, 4, Tier::Naive).unwrap();
        assert_eq!(outcome, Outcome::Continuing);
        assert_eq!(game.board().get(4), Cell::One);
        assert_eq!(game.board().legal_moves().len(), 7);
        assert_eq!(game.score(), score);
    }
}
