//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use thiserror::Error;

use crate::board::{Board, CastlingRights};
use crate::{Color, Piece, Square};

/// The standard starting position FEN.
pub(crate) const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parses a FEN string into a board.
pub(crate) fn parse(fen: &str) -> Result<Board, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(FenError::InvalidPartCount(parts.len()));
    }

    let mut board = Board::blank();

    // Piece placement, rank 8 first.
    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                file += digit as u8;
            } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                if file > 7 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} overflows the board",
                        rank + 1
                    )));
                }
                let sq = Square::from_index(rank * 8 + file)
                    .expect("rank and file are both in 0..8");
                board.put(sq, piece, color);
                file += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    rank + 1
                )));
            }
        }
        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 8",
                rank + 1,
                file
            )));
        }
    }

    // Active color.
    board.side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::InvalidActiveColor(other.to_string())),
    };

    // Castling rights.
    let mut castling = 0u8;
    if parts[2] != "-" {
        for c in parts[2].chars() {
            match c {
                'K' => castling |= CastlingRights::WHITE_KINGSIDE,
                'Q' => castling |= CastlingRights::WHITE_QUEENSIDE,
                'k' => castling |= CastlingRights::BLACK_KINGSIDE,
                'q' => castling |= CastlingRights::BLACK_QUEENSIDE,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            }
        }
    }
    board.castling = CastlingRights::new(castling);

    // En passant target.
    board.en_passant = if parts[3] == "-" {
        None
    } else {
        Some(
            Square::from_algebraic(parts[3])
                .ok_or_else(|| FenError::InvalidEnPassantSquare(parts[3].to_string()))?,
        )
    };

    board.halfmove_clock = parts[4]
        .parse::<u32>()
        .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;
    board.fullmove_number = parts[5]
        .parse::<u32>()
        .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

    Ok(board)
}

/// Serializes a board to a FEN string.
pub(crate) fn serialize(board: &Board) -> String {
    let mut fen = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0;
        for file in 0..8u8 {
            let sq = Square::from_index(rank * 8 + file).expect("index below 64");
            if let Some((piece, color)) = board.piece_at(sq) {
                if empty_count > 0 {
                    fen.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                fen.push(piece.to_fen_char(color));
            } else {
                empty_count += 1;
            }
        }
        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match board.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    if board.castling.raw() == 0 {
        fen.push('-');
    } else {
        if board.castling.can_castle_kingside(Color::White) {
            fen.push('K');
        }
        if board.castling.can_castle_queenside(Color::White) {
            fen.push('Q');
        }
        if board.castling.can_castle_kingside(Color::Black) {
            fen.push('k');
        }
        if board.castling.can_castle_queenside(Color::Black) {
            fen.push('q');
        }
    }

    fen.push(' ');
    match board.en_passant {
        Some(sq) => fen.push_str(&sq.to_algebraic()),
        None => fen.push('-'),
    }

    fen.push(' ');
    fen.push_str(&board.halfmove_clock.to_string());
    fen.push(' ');
    fen.push_str(&board.fullmove_number.to_string());

    fen
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn startpos_roundtrip() {
        let board = parse(STARTPOS).unwrap();
        assert_eq!(serialize(&board), STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let board = parse(fen).unwrap();
        assert_eq!(serialize(&board), fen);
    }

    #[test]
    fn invalid_part_count() {
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
            Err(FenError::InvalidPartCount(5))
        );
    }

    #[test]
    fn invalid_active_color() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1";
        assert!(matches!(parse(fen), Err(FenError::InvalidActiveColor(_))));
    }

    #[test]
    fn invalid_placement_character() {
        let fen = "rnbqkbnr/ppppppp!/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            parse(fen),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_rank_width() {
        let fen = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            parse(fen),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn en_passant_square() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = parse(fen).unwrap();
        assert_eq!(board.en_passant.unwrap().to_algebraic(), "e3");
        assert_eq!(serialize(&board), fen);
    }

    proptest! {
        #[test]
        fn roundtrip_over_random_playouts(
            seeds in proptest::collection::vec(0usize..218, 0..40)
        ) {
            let mut board = Board::startpos();
            for seed in seeds {
                let legal = board.legal_moves();
                if legal.is_empty() {
                    break;
                }
                board = board.make_move(legal[seed % legal.len()]);
            }
            prop_assert_eq!(parse(&serialize(&board)), Ok(board));
        }
    }
}
