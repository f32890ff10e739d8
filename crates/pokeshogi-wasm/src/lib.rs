use wasm_bindgen::prelude::*;

use pokeshogi_core::{ClickOutcome, Game, PieceId, PieceType, Position};
use serde::Serialize;

/// Initialize panic hook for readable error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Serializable highlight representation for JS consumers.
#[derive(Serialize)]
struct JsCell {
    row: u8,
    col: u8,
    key: String,
}

impl From<Position> for JsCell {
    fn from(position: Position) -> Self {
        Self {
            row: position.row,
            col: position.col,
            key: position.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsSelection {
    selected_cell: Option<JsCell>,
    selected_hand_piece: Option<u32>,
    highlights: Vec<JsCell>,
}

fn click_outcome_str(outcome: ClickOutcome) -> &'static str {
    match outcome {
        ClickOutcome::Selected => "selected",
        ClickOutcome::Cancelled => "cancelled",
        ClickOutcome::Moved => "moved",
        ClickOutcome::Dropped => "dropped",
        ClickOutcome::Ignored => "ignored",
    }
}

fn cell(row: u8, col: u8) -> Result<Position, JsError> {
    Position::new(row, col).ok_or_else(|| JsError::new(&format!("cell {row}-{col} is off the board")))
}

/// Main WASM-exported rules engine, holding one interactive game session.
#[wasm_bindgen]
pub struct PokeshogiEngine {
    game: Game,
}

#[wasm_bindgen]
impl PokeshogiEngine {
    /// Create a new game from the starting layout.
    #[wasm_bindgen(constructor)]
    pub fn new() -> PokeshogiEngine {
        Self { game: Game::new() }
    }

    /// Replace the current game with a position in compact notation.
    #[wasm_bindgen(js_name = "loadPosition")]
    pub fn load_position(&mut self, notation: &str) -> Result<(), JsError> {
        self.game
            .load(notation)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Get the current position in compact notation.
    pub fn position(&self) -> String {
        self.game.notation()
    }

    /// Board rows as JSON: `(Piece | null)[][]`.
    pub fn board(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.game.board()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Captured pieces as JSON: `{ player1: Piece[], player2: Piece[] }`.
    pub fn hands(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.game.hands()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Full game state as JSON, shaped like the UI's `GameState`.
    pub fn state(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.game.state()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Current selection and highlighted cells.
    pub fn highlights(&self) -> Result<JsValue, JsError> {
        let selection = JsSelection {
            selected_cell: self.game.selected_cell().map(JsCell::from),
            selected_hand_piece: self.game.selected_hand_piece().map(|id| id.0),
            highlights: self.game.highlights().iter().copied().map(JsCell::from).collect(),
        };
        serde_wasm_bindgen::to_value(&selection).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Returns "player1" or "player2" for the side to move.
    pub fn turn(&self) -> String {
        self.game.turn().name().to_string()
    }

    /// Returns "playing", "player1_win" or "player2_win".
    pub fn status(&self) -> String {
        self.game.status().name().to_string()
    }

    #[wasm_bindgen(js_name = "legalDestinations")]
    pub fn legal_destinations(&self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let from = cell(row, col)?;
        let cells: Vec<JsCell> = self
            .game
            .legal_destinations(from)
            .into_iter()
            .map(JsCell::from)
            .collect();
        serde_wasm_bindgen::to_value(&cells).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = "movePiece")]
    pub fn move_piece(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<(), JsError> {
        let from = cell(from_row, from_col)?;
        let to = cell(to_row, to_col)?;
        self.game
            .move_piece(from, to)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = "dropPiece")]
    pub fn drop_piece(&mut self, piece_id: u32, row: u8, col: u8) -> Result<(), JsError> {
        let to = cell(row, col)?;
        self.game
            .drop_piece(PieceId(piece_id), to)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Feed a board click to the session. Returns what the click did.
    #[wasm_bindgen(js_name = "clickCell")]
    pub fn click_cell(&mut self, row: u8, col: u8) -> Result<String, JsError> {
        let at = cell(row, col)?;
        Ok(click_outcome_str(self.game.click_cell(at)).to_string())
    }

    #[wasm_bindgen(js_name = "clickHandPiece")]
    pub fn click_hand_piece(&mut self, piece_id: u32) -> String {
        click_outcome_str(self.game.click_hand_piece(PieceId(piece_id))).to_string()
    }

    #[wasm_bindgen(js_name = "cancelSelection")]
    pub fn cancel_selection(&mut self) {
        self.game.cancel_selection();
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// Returns true if either king was captured or reached the far row.
    #[wasm_bindgen(js_name = "isGameOver")]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// National pokédex number for a piece type name, used for sprite lookup.
    #[wasm_bindgen(js_name = "pokedexId")]
    pub fn pokedex_id(type_name: &str) -> Result<u16, JsError> {
        PieceType::from_name(type_name)
            .map(PieceType::pokedex_id)
            .ok_or_else(|| JsError::new(&format!("unknown piece type: {type_name}")))
    }
}

impl Default for PokeshogiEngine {
    fn default() -> Self {
        Self::new()
    }
}
