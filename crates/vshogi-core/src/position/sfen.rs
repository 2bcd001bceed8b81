//! SFEN形式の解析・出力
//!
//! 解析は1文字ずつの状態遷移で行い、解釈できなかった文字は読み飛ばして記録する。
//! 厳密な [`State::from_sfen`] は読み飛ばしがあればエラーを返し、
//! [`State::from_sfen_lossy`] は警告ログを出して続行する。

use crate::error::{SfenError, SfenField};
use crate::types::{Color, Piece, PieceType, Square};
use crate::variant::{Rules, Variant};

use super::{Board, Stand, State};

/// 文字を読み飛ばした理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 解釈できない文字
    Unexpected,
    /// 盤の外に置かれる駒
    BoardOverflow { rank: usize },
    /// 上限を超える持ち駒
    StandOverflow,
}

/// 読み飛ばした文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedChar {
    pub field: SfenField,
    /// 入力中のバイト位置
    pub position: usize,
    pub ch: char,
    pub reason: SkipReason,
}

impl SkippedChar {
    fn into_error(self) -> SfenError {
        match self.reason {
            SkipReason::Unexpected => SfenError::UnexpectedChar {
                field: self.field,
                position: self.position,
                ch: self.ch,
            },
            SkipReason::BoardOverflow { rank } => SfenError::BoardOverflow { rank },
            SkipReason::StandOverflow => SfenError::StandOverflow(self.ch.to_string()),
        }
    }
}

/// SFEN解析の結果
#[derive(Debug, Clone)]
pub struct SfenParse<V: Variant> {
    pub state: State<V>,
    pub skipped: Vec<SkippedChar>,
    /// 手数フィールド（なければ `None`）
    pub ply: Option<u32>,
}

/// 解析中のフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Board,
    Turn,
    Stand,
    Ply,
    Done,
}

impl Cursor {
    fn next(self) -> Cursor {
        match self {
            Cursor::Board => Cursor::Turn,
            Cursor::Turn => Cursor::Stand,
            Cursor::Stand => Cursor::Ply,
            Cursor::Ply | Cursor::Done => Cursor::Done,
        }
    }

    fn field(self) -> SfenField {
        match self {
            Cursor::Board => SfenField::Board,
            Cursor::Turn => SfenField::SideToMove,
            Cursor::Stand => SfenField::Stand,
            Cursor::Ply | Cursor::Done => SfenField::Ply,
        }
    }
}

struct Parser<V: Variant> {
    cursor: Cursor,
    board: Board<V>,
    stands: [Stand<V>; Color::NUM],
    turn: Color,
    ply: Option<u32>,
    skipped: Vec<SkippedChar>,
    // 盤面
    row: usize,
    col: usize,
    empties: usize,
    /// 空きマス数の先頭の数字
    empties_at: Option<(usize, char)>,
    promote_at: Option<usize>,
    // 持ち駒
    count: Option<u32>,
}

impl<V: Variant> Parser<V> {
    fn new() -> Parser<V> {
        Parser {
            cursor: Cursor::Board,
            board: Board::empty(),
            stands: [Stand::empty(); Color::NUM],
            turn: Color::Black,
            ply: None,
            skipped: Vec::new(),
            row: 0,
            col: 0,
            empties: 0,
            empties_at: None,
            promote_at: None,
            count: None,
        }
    }

    fn skip(&mut self, position: usize, ch: char, reason: SkipReason) {
        self.skipped.push(SkippedChar { field: self.cursor.field(), position, ch, reason });
    }

    fn run(mut self, sfen: &str) -> SfenParse<V> {
        let mut prev_space = false;
        for (pos, ch) in sfen.char_indices() {
            if ch.is_whitespace() {
                if !prev_space {
                    self.end_field();
                    self.cursor = self.cursor.next();
                }
                prev_space = true;
                continue;
            }
            prev_space = false;
            match self.cursor {
                Cursor::Board => self.board_char(pos, ch),
                Cursor::Turn => self.turn_char(pos, ch),
                Cursor::Stand => self.stand_char(pos, ch),
                Cursor::Ply => self.ply_char(pos, ch),
                Cursor::Done => self.skip(pos, ch, SkipReason::Unexpected),
            }
        }
        self.end_field();
        let state = State::from_parts(self.board, self.stands, self.turn);
        SfenParse { state, skipped: self.skipped, ply: self.ply }
    }

    fn end_field(&mut self) {
        match self.cursor {
            Cursor::Board => {
                self.flush_empties();
                if let Some(pos) = self.promote_at.take() {
                    self.skip(pos, '+', SkipReason::Unexpected);
                }
            }
            Cursor::Stand => {
                self.count = None;
            }
            _ => {}
        }
    }

    /// 列は筋数で頭打ちにする。盤をはみ出す空きマス数は読み飛ばしとして記録する
    fn flush_empties(&mut self) {
        let empties = std::mem::take(&mut self.empties);
        let Some((pos, ch)) = self.empties_at.take() else {
            return;
        };
        let col = self.col.saturating_add(empties);
        if col > V::NUM_FILES {
            self.skip(pos, ch, SkipReason::BoardOverflow { rank: self.row });
        }
        self.col = col.min(V::NUM_FILES);
    }

    fn board_char(&mut self, pos: usize, ch: char) {
        if let Some(d) = ch.to_digit(10) {
            self.empties = self.empties.saturating_mul(10).saturating_add(d as usize);
            if self.empties_at.is_none() {
                self.empties_at = Some((pos, ch));
            }
            return;
        }
        self.flush_empties();
        match ch {
            '/' => {
                self.row = (self.row + 1).min(V::NUM_RANKS);
                self.col = 0;
            }
            '+' => {
                if let Some(prev) = self.promote_at.replace(pos) {
                    self.skip(prev, '+', SkipReason::Unexpected);
                }
            }
            _ => {
                let promote_at = self.promote_at.take();
                let Some(pt) = V::piece_from_char(ch) else {
                    self.skip(pos, ch, SkipReason::Unexpected);
                    return;
                };
                let pt = match promote_at {
                    Some(_) if V::RULES == Rules::Standard && V::is_promotable(pt) => pt.promote(),
                    Some(plus) => {
                        self.skip(plus, '+', SkipReason::Unexpected);
                        pt
                    }
                    None => pt,
                };
                let color = if ch.is_ascii_uppercase() { Color::Black } else { Color::White };
                match V::square_at(self.col as i32, self.row as i32) {
                    Some(sq) => self.board.set(sq, Piece::new(color, pt)),
                    None => self.skip(pos, ch, SkipReason::BoardOverflow { rank: self.row }),
                }
                self.col = (self.col + 1).min(V::NUM_FILES);
            }
        }
    }

    fn turn_char(&mut self, pos: usize, ch: char) {
        match Color::from_sfen_char(ch) {
            Some(c) => self.turn = c,
            None => self.skip(pos, ch, SkipReason::Unexpected),
        }
    }

    fn stand_char(&mut self, pos: usize, ch: char) {
        if ch == '-' {
            return;
        }
        if let Some(d) = ch.to_digit(10) {
            self.count = Some(self.count.unwrap_or(0).saturating_mul(10).saturating_add(d));
            return;
        }
        let count = self.count.take().unwrap_or(1);
        let pt = match V::piece_from_char(ch) {
            Some(pt) if V::STAND_TYPES.contains(&pt) => pt,
            _ => {
                self.skip(pos, ch, SkipReason::Unexpected);
                return;
            }
        };
        let color = if ch.is_ascii_uppercase() { Color::Black } else { Color::White };
        let stand = &mut self.stands[color.index()];
        let mut overflow = false;
        for _ in 0..count {
            if !stand.add(pt) {
                overflow = true;
                break;
            }
        }
        if overflow {
            self.skip(pos, ch, SkipReason::StandOverflow);
        }
    }

    fn ply_char(&mut self, pos: usize, ch: char) {
        match ch.to_digit(10) {
            Some(d) => {
                let ply = self.ply.unwrap_or(0);
                self.ply = Some(ply.saturating_mul(10).saturating_add(d));
            }
            None => self.skip(pos, ch, SkipReason::Unexpected),
        }
    }
}

impl<V: Variant> State<V> {
    /// SFENを解析し、読み飛ばした文字とともに返す
    pub fn parse_sfen(sfen: &str) -> SfenParse<V> {
        Parser::new().run(sfen.trim())
    }

    /// SFEN文字列から局面を作る。解釈できない文字があればエラー
    pub fn from_sfen(sfen: &str) -> Result<State<V>, SfenError> {
        if sfen.trim().is_empty() {
            return Err(SfenError::Empty);
        }
        let parsed = Self::parse_sfen(sfen);
        match parsed.skipped.into_iter().next() {
            Some(skipped) => Err(skipped.into_error()),
            None => Ok(parsed.state),
        }
    }

    /// SFEN文字列から局面を作る。解釈できない文字は警告を出して読み飛ばす
    pub fn from_sfen_lossy(sfen: &str) -> State<V> {
        let parsed = Self::parse_sfen(sfen);
        for s in &parsed.skipped {
            log::warn!(
                "sfen: skipped {:?} at {} in {} field ({:?}): {sfen}",
                s.ch,
                s.position,
                s.field,
                s.reason
            );
        }
        parsed.state
    }

    /// 手数なしのSFEN文字列
    pub fn to_sfen(&self) -> String {
        let mut result = String::new();

        // 1. 盤面
        for row in 0..V::NUM_RANKS {
            let mut empty_count = 0;
            for col in 0..V::NUM_FILES {
                let sq = Square::new((row * V::NUM_FILES + col) as u8);
                let pc = self.board().get(sq);
                match (pc.color(), pc.piece_type()) {
                    (Some(c), Some(pt)) => {
                        if empty_count > 0 {
                            result.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        push_piece::<V>(&mut result, c, pt);
                    }
                    _ => empty_count += 1,
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if row + 1 < V::NUM_RANKS {
                result.push('/');
            }
        }

        // 2. 手番
        result.push(' ');
        result.push(self.turn().to_sfen_char());

        // 3. 持ち駒
        result.push(' ');
        let stand = self.stand_to_sfen();
        if stand.is_empty() {
            result.push('-');
        } else {
            result.push_str(&stand);
        }
        result
    }

    /// 手数付きのSFEN文字列
    pub fn to_sfen_with_ply(&self, ply: u32) -> String {
        format!("{} {ply}", self.to_sfen())
    }

    fn stand_to_sfen(&self) -> String {
        let mut result = String::new();
        for c in Color::ALL {
            let stand = self.stand(c);
            for &pt in V::STAND_SFEN_ORDER {
                let cnt = stand.count(pt);
                if cnt == 0 {
                    continue;
                }
                if cnt > 1 {
                    result.push_str(&cnt.to_string());
                }
                push_char(&mut result, c, V::piece_char(pt));
            }
        }
        result
    }
}

fn push_piece<V: Variant>(out: &mut String, c: Color, pt: PieceType) {
    if pt.is_promoted() && V::RULES == Rules::Standard {
        out.push('+');
    }
    push_char(out, c, V::piece_char(pt));
}

fn push_char(out: &mut String, c: Color, ch: char) {
    out.push(match c {
        Color::Black => ch.to_ascii_uppercase(),
        Color::White => ch,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{AnimalShogi, JudkinsShogi, Minishogi, Shogi, animal, shogi};

    #[test]
    fn test_default_sfen_round_trip() {
        let s = State::<AnimalShogi>::new();
        assert_eq!(s.to_sfen(), "gle/1c1/1C1/ELG b -");
        let s = State::<Minishogi>::new();
        assert_eq!(s.to_sfen_with_ply(1), Minishogi::DEFAULT_SFEN);
        let s = State::<JudkinsShogi>::new();
        assert_eq!(s.to_sfen_with_ply(1), JudkinsShogi::DEFAULT_SFEN);
        let s = State::<Shogi>::new();
        assert_eq!(s.to_sfen_with_ply(1), Shogi::DEFAULT_SFEN);
    }

    #[test]
    fn test_promoted_and_stand() {
        let sfen = "l+R5nl/4g1gk1/p2pppsp1/2p4Bp/9/1PP1P4/P2P1PPPP/1S2K1S2/L2G1G1NL w BS2Pnp";
        let s = State::<Shogi>::from_sfen(sfen).unwrap();
        assert_eq!(s.to_sfen(), sfen);
        assert_eq!(s.turn(), Color::White);
        assert_eq!(s.stand(Color::Black).count(shogi::FU), 2);
        assert_eq!(s.stand(Color::White).count(shogi::KE), 1);
        let sq = Shogi::parse_square("8a").unwrap();
        assert_eq!(s.board().get(sq), Piece::new(Color::Black, shogi::RY));
    }

    #[test]
    fn test_two_digit_stand_count() {
        let s = State::<Shogi>::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b 12P").unwrap();
        assert_eq!(s.stand(Color::Black).count(shogi::FU), 12);
        assert_eq!(s.to_sfen(), "4k4/9/9/9/9/9/9/9/4K4 b 12P");
    }

    #[test]
    fn test_animal_hen() {
        let s = State::<AnimalShogi>::from_sfen("lH1/3/3/2L w Cg").unwrap();
        assert_eq!(s.board().get(animal::B1), Piece::new(Color::Black, animal::HE));
        assert_eq!(s.to_sfen(), "lH1/3/3/2L w Cg");
    }

    #[test]
    fn test_ply_field() {
        let parsed = State::<Minishogi>::parse_sfen("rbsgk/4p/5/P4/KGSBR w - 42");
        assert!(parsed.skipped.is_empty());
        assert_eq!(parsed.ply, Some(42));
        assert_eq!(parsed.state.turn(), Color::White);
        let parsed = State::<Minishogi>::parse_sfen("rbsgk/4p/5/P4/KGSBR b -");
        assert_eq!(parsed.ply, None);
    }

    #[test]
    fn test_strict_errors() {
        assert_eq!(State::<Shogi>::from_sfen("   "), Err(SfenError::Empty));
        assert_eq!(
            State::<AnimalShogi>::from_sfen("glx/1c1/1C1/ELG b -"),
            Err(SfenError::UnexpectedChar { field: SfenField::Board, position: 2, ch: 'x' })
        );
        assert_eq!(
            State::<AnimalShogi>::from_sfen("gle/1c1/1C1/ELG x -"),
            Err(SfenError::UnexpectedChar { field: SfenField::SideToMove, position: 16, ch: 'x' })
        );
        assert_eq!(
            State::<AnimalShogi>::from_sfen("gleg/1c1/1C1/ELG b -"),
            Err(SfenError::BoardOverflow { rank: 0 })
        );
        assert_eq!(
            State::<AnimalShogi>::from_sfen("gle/1c1/1C1/ELG b 3C"),
            Err(SfenError::StandOverflow("C".to_string()))
        );
        // 持ち駒にならない駒
        assert!(State::<AnimalShogi>::from_sfen("gle/1c1/1C1/ELG b L").is_err());
        // 成れない駒の+
        assert!(State::<Shogi>::from_sfen("4+k4/9/9/9/9/9/9/9/4K4 b -").is_err());
    }

    #[test]
    fn test_lossy_keeps_going() {
        let s = State::<AnimalShogi>::from_sfen_lossy("gle/1c1/1C1/ELGX b - 1 extra");
        assert_eq!(s.to_sfen(), "gle/1c1/1C1/ELG b -");
        let s = State::<Shogi>::from_sfen_lossy("4+k4/9/9/9/9/9/9/9/4K4 b -");
        assert_eq!(s.to_sfen(), "4k4/9/9/9/9/9/9/9/4K4 b -");
    }

    #[test]
    fn test_long_empty_run() {
        let sfen = "99999999999999999999999 b -";
        assert_eq!(State::<Shogi>::from_sfen(sfen), Err(SfenError::BoardOverflow { rank: 0 }));
        let s = State::<Shogi>::from_sfen_lossy(sfen);
        assert_eq!(s.to_sfen(), "9/9/9/9/9/9/9/9/9 b -");

        // 段の数を超える区切りの後の駒は盤外
        let parsed = State::<Minishogi>::parse_sfen("5/5/5/5/5/5/5/K b -");
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].reason, SkipReason::BoardOverflow { rank: 5 });
        assert_eq!(
            State::<Minishogi>::from_sfen("6/5/5/5/5 b -"),
            Err(SfenError::BoardOverflow { rank: 0 })
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let s = State::<AnimalShogi>::from_sfen("gle/1c1/1C1/ELG").unwrap();
        assert_eq!(s.turn(), Color::Black);
        assert!(s.stand(Color::Black).is_empty());
    }
}
