//! Chess board state, attack detection, and move application.

use crate::{fen, Color, FenError, Move, Piece, Rank, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side retains any castling right.
    #[inline]
    pub const fn any_for(self, color: Color) -> bool {
        self.can_castle_kingside(color) || self.can_castle_queenside(color)
    }

    /// Removes all castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A chess position snapshot.
///
/// The board is a 64-slot mailbox plus side to move, castling rights, en
/// passant target, and the halfmove/fullmove counters. Applying a move via
/// [`Board::make_move`] produces a new board; existing snapshots are never
/// mutated, so the annotation pipeline can read the pre-move position after
/// the move has been applied.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<(Piece, Color)>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// Creates a board with no pieces.
    pub(crate) fn blank() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(fen::STARTPOS).expect("startpos FEN is valid")
    }

    /// Creates a board from a FEN string.
    pub fn from_fen(s: &str) -> Result<Self, FenError> {
        fen::parse(s)
    }

    /// Serializes the board to a FEN string.
    pub fn to_fen(&self) -> String {
        fen::serialize(self)
    }

    pub(crate) fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        self.squares[sq.index() as usize] = Some((piece, color));
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize]
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the castling rights.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the halfmove clock (50-move rule counter).
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the fullmove number (starts at 1, increments after Black).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the king square for the given color.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some((Piece::King, color)))
    }

    /// Returns the material balance in pawns: white piece values minus
    /// black piece values.
    pub fn material_balance(&self) -> i32 {
        Square::all()
            .filter_map(|sq| self.piece_at(sq))
            .map(|(piece, color)| match color {
                Color::White => piece.value(),
                Color::Black => -piece.value(),
            })
            .sum()
    }

    /// Returns true if any piece of `color` attacks `sq`.
    pub fn is_attacked_by(&self, color: Color, sq: Square) -> bool {
        // Pawns: a pawn of `color` attacks `sq` from one rank behind it.
        let behind = -color.pawn_direction();
        for df in [-1, 1] {
            if let Some(from) = sq.offset(behind, df) {
                if self.piece_at(from) == Some((Piece::Pawn, color)) {
                    return true;
                }
            }
        }

        for (dr, df) in KNIGHT_OFFSETS {
            if let Some(from) = sq.offset(dr, df) {
                if self.piece_at(from) == Some((Piece::Knight, color)) {
                    return true;
                }
            }
        }

        for (dr, df) in KING_OFFSETS {
            if let Some(from) = sq.offset(dr, df) {
                if self.piece_at(from) == Some((Piece::King, color)) {
                    return true;
                }
            }
        }

        // Sliders: walk each ray outward to the first occupied square.
        for (dr, df) in BISHOP_DIRS {
            if let Some((piece, c)) = self.first_piece_on_ray(sq, dr, df) {
                if c == color && matches!(piece, Piece::Bishop | Piece::Queen) {
                    return true;
                }
            }
        }
        for (dr, df) in ROOK_DIRS {
            if let Some((piece, c)) = self.first_piece_on_ray(sq, dr, df) {
                if c == color && matches!(piece, Piece::Rook | Piece::Queen) {
                    return true;
                }
            }
        }

        false
    }

    fn first_piece_on_ray(&self, from: Square, dr: i8, df: i8) -> Option<(Piece, Color)> {
        let mut sq = from;
        while let Some(next) = sq.offset(dr, df) {
            if let Some(occupant) = self.piece_at(next) {
                return Some(occupant);
            }
            sq = next;
        }
        None
    }

    /// Returns the squares attacked by the piece standing on `from`.
    ///
    /// For pawns this is the two capture diagonals, not the push squares.
    /// Returns an empty list if `from` is empty.
    pub fn attacked_squares(&self, from: Square) -> Vec<Square> {
        let Some((piece, color)) = self.piece_at(from) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        match piece {
            Piece::Pawn => {
                let dir = color.pawn_direction();
                for df in [-1, 1] {
                    if let Some(sq) = from.offset(dir, df) {
                        out.push(sq);
                    }
                }
            }
            Piece::Knight => {
                for (dr, df) in KNIGHT_OFFSETS {
                    if let Some(sq) = from.offset(dr, df) {
                        out.push(sq);
                    }
                }
            }
            Piece::King => {
                for (dr, df) in KING_OFFSETS {
                    if let Some(sq) = from.offset(dr, df) {
                        out.push(sq);
                    }
                }
            }
            Piece::Bishop | Piece::Rook | Piece::Queen => {
                let dirs: &[(i8, i8)] = match piece {
                    Piece::Bishop => &BISHOP_DIRS,
                    Piece::Rook => &ROOK_DIRS,
                    _ => &[
                        (1, 1),
                        (1, -1),
                        (-1, 1),
                        (-1, -1),
                        (1, 0),
                        (-1, 0),
                        (0, 1),
                        (0, -1),
                    ],
                };
                for &(dr, df) in dirs {
                    let mut sq = from;
                    while let Some(next) = sq.offset(dr, df) {
                        out.push(next);
                        if self.piece_at(next).is_some() {
                            break;
                        }
                        sq = next;
                    }
                }
            }
        }
        out
    }

    /// Returns true if the given color's king is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(sq) => self.is_attacked_by(color.opposite(), sq),
            None => false,
        }
    }

    /// Returns true if this move captures a piece (including en passant).
    pub fn is_capture(&self, m: Move) -> bool {
        self.captured_piece(m).is_some()
    }

    /// Returns the piece this move would capture, read from the pre-move
    /// position (en passant captures a pawn not on the destination square).
    pub fn captured_piece(&self, m: Move) -> Option<Piece> {
        if let Some((piece, _)) = self.piece_at(m.to()) {
            return Some(piece);
        }
        if let Some((Piece::Pawn, _)) = self.piece_at(m.from()) {
            if self.en_passant == Some(m.to()) && m.from().file() != m.to().file() {
                return Some(Piece::Pawn);
            }
        }
        None
    }

    /// Generates all legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let color = self.side_to_move;
        self.pseudo_moves(color)
            .into_iter()
            .filter(|&m| !self.make_move(m).in_check(color))
            .collect()
    }

    /// Returns true if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Returns true if the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Returns true if neither side can possibly deliver mate
    /// (K vs K, K+minor vs K, or bishops all on one square color).
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishop_square_colors = [false; 2];
        for sq in Square::all() {
            match self.piece_at(sq) {
                None | Some((Piece::King, _)) => {}
                Some((Piece::Knight, _)) => minors += 1,
                Some((Piece::Bishop, _)) => {
                    minors += 1;
                    let shade = (sq.rank().index() + sq.file().index()) % 2;
                    bishop_square_colors[shade as usize] = true;
                }
                Some(_) => return false,
            }
        }
        match minors {
            0 | 1 => true,
            // Only bishops, all standing on the same square color.
            _ => {
                let only_bishops = Square::all().all(|sq| {
                    !matches!(self.piece_at(sq), Some((Piece::Knight, _)))
                });
                only_bishops && !(bishop_square_colors[0] && bishop_square_colors[1])
            }
        }
    }

    /// Applies a move and returns the resulting board.
    ///
    /// The move must be legal in this position; callers validate against
    /// [`Board::legal_moves`] first. Handles castling rook relocation, en
    /// passant removal, promotion, castling-right updates, and the
    /// halfmove/fullmove counters.
    pub fn make_move(&self, m: Move) -> Board {
        let mut board = self.clone();
        let Some((piece, color)) = self.piece_at(m.from()) else {
            return board;
        };

        let is_capture = self.is_capture(m);

        // En passant: remove the captured pawn from its actual square.
        if piece == Piece::Pawn
            && self.en_passant == Some(m.to())
            && m.from().file() != m.to().file()
            && self.piece_at(m.to()).is_none()
        {
            if let Some(captured_sq) = m.to().offset(-color.pawn_direction(), 0) {
                board.squares[captured_sq.index() as usize] = None;
            }
        }

        // Castling: the king moves two files; relocate the rook.
        if piece == Piece::King {
            let from_file = m.from().file().index() as i8;
            let to_file = m.to().file().index() as i8;
            if (from_file - to_file).abs() == 2 {
                let rank = m.from().rank();
                let (rook_from, rook_to) = if to_file > from_file {
                    (Square::new(crate::File::H, rank), Square::new(crate::File::F, rank))
                } else {
                    (Square::new(crate::File::A, rank), Square::new(crate::File::D, rank))
                };
                board.squares[rook_to.index() as usize] =
                    board.squares[rook_from.index() as usize].take();
                board.squares[rook_from.index() as usize] = None;
            }
        }

        // Move the piece, applying promotion if present.
        board.squares[m.from().index() as usize] = None;
        let placed = m.promotion_piece().unwrap_or(piece);
        board.squares[m.to().index() as usize] = Some((placed, color));

        // Castling rights: king moves drop both, rook moves and rook
        // captures drop the matching side.
        if piece == Piece::King {
            board.castling.remove_color(color);
        }
        for (sq, c, kingside) in [
            (Square::H1, Color::White, true),
            (Square::A1, Color::White, false),
            (Square::H8, Color::Black, true),
            (Square::A8, Color::Black, false),
        ] {
            if m.from() == sq || m.to() == sq {
                if kingside {
                    board.castling.remove_kingside(c);
                } else {
                    board.castling.remove_queenside(c);
                }
            }
        }

        // En passant target: set only on a double pawn push.
        board.en_passant = None;
        if piece == Piece::Pawn {
            let rank_delta =
                m.to().rank().index() as i8 - m.from().rank().index() as i8;
            if rank_delta.abs() == 2 {
                board.en_passant = m.from().offset(color.pawn_direction(), 0);
            }
        }

        if piece == Piece::Pawn || is_capture {
            board.halfmove_clock = 0;
        } else {
            board.halfmove_clock += 1;
        }

        board.side_to_move = color.opposite();
        if board.side_to_move == Color::White {
            board.fullmove_number += 1;
        }

        board
    }

    /// Returns the same position with the side to move flipped and the en
    /// passant target cleared, giving the "pass" position that lets the
    /// engine evaluate from the opponent's perspective.
    pub fn null_move(&self) -> Board {
        let mut board = self.clone();
        board.side_to_move = self.side_to_move.opposite();
        board.en_passant = None;
        if board.side_to_move == Color::White {
            board.fullmove_number += 1;
        }
        board
    }

    fn pseudo_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in Square::all() {
            let Some((piece, c)) = self.piece_at(from) else {
                continue;
            };
            if c != color {
                continue;
            }
            match piece {
                Piece::Pawn => self.pawn_moves(from, color, &mut moves),
                Piece::Knight => self.step_moves(from, color, &KNIGHT_OFFSETS, &mut moves),
                Piece::King => {
                    self.step_moves(from, color, &KING_OFFSETS, &mut moves);
                    self.castling_moves(from, color, &mut moves);
                }
                Piece::Bishop => self.slide_moves(from, color, &BISHOP_DIRS, &mut moves),
                Piece::Rook => self.slide_moves(from, color, &ROOK_DIRS, &mut moves),
                Piece::Queen => {
                    self.slide_moves(from, color, &BISHOP_DIRS, &mut moves);
                    self.slide_moves(from, color, &ROOK_DIRS, &mut moves);
                }
            }
        }
        moves
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        let dir = color.pawn_direction();
        let start_rank = match color {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        };
        let promo_rank = color.opposite().back_rank();

        let mut push = |from: Square, to: Square, moves: &mut Vec<Move>| {
            if to.rank() == promo_rank {
                for piece in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
                    moves.push(Move::promotion(from, to, piece));
                }
            } else {
                moves.push(Move::new(from, to));
            }
        };

        if let Some(one) = from.offset(dir, 0) {
            if self.piece_at(one).is_none() {
                push(from, one, moves);
                if from.rank() == start_rank {
                    if let Some(two) = one.offset(dir, 0) {
                        if self.piece_at(two).is_none() {
                            moves.push(Move::new(from, two));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(to) = from.offset(dir, df) else {
                continue;
            };
            match self.piece_at(to) {
                Some((_, c)) if c != color => push(from, to, moves),
                None if self.en_passant == Some(to) => moves.push(Move::new(from, to)),
                _ => {}
            }
        }
    }

    fn step_moves(
        &self,
        from: Square,
        color: Color,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in offsets {
            let Some(to) = from.offset(dr, df) else {
                continue;
            };
            match self.piece_at(to) {
                Some((_, c)) if c == color => {}
                _ => moves.push(Move::new(from, to)),
            }
        }
    }

    fn slide_moves(
        &self,
        from: Square,
        color: Color,
        dirs: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in dirs {
            let mut sq = from;
            while let Some(to) = sq.offset(dr, df) {
                match self.piece_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some((_, c)) => {
                        if c != color {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
                sq = to;
            }
        }
    }

    fn castling_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        let home = Square::new(crate::File::E, color.back_rank());
        if from != home || self.in_check(color) {
            return;
        }
        let enemy = color.opposite();
        let rank = color.back_rank();

        if self.castling.can_castle_kingside(color) {
            let f = Square::new(crate::File::F, rank);
            let g = Square::new(crate::File::G, rank);
            if self.piece_at(f).is_none()
                && self.piece_at(g).is_none()
                && !self.is_attacked_by(enemy, f)
                && !self.is_attacked_by(enemy, g)
            {
                moves.push(Move::new(from, g));
            }
        }
        if self.castling.can_castle_queenside(color) {
            let d = Square::new(crate::File::D, rank);
            let c = Square::new(crate::File::C, rank);
            let b = Square::new(crate::File::B, rank);
            if self.piece_at(d).is_none()
                && self.piece_at(c).is_none()
                && self.piece_at(b).is_none()
                && !self.is_attacked_by(enemy, d)
                && !self.is_attacked_by(enemy, c)
            {
                moves.push(Move::new(from, c));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}
