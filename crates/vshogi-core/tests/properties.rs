//! ランダムな対局と壊れた入力で局面の不変条件を確かめる

use proptest::prelude::*;
use vshogi_core::variant::{AnimalShogi, JudkinsShogi, Minishogi, Shogi, Variant};
use vshogi_core::{Color, Game, GameResult, Move, State};

/// `choices` で合法手を選びながら指し進め、各局面で不変条件を確かめる
fn check_playout<V: Variant>(choices: &[u16]) -> Result<(), TestCaseError> {
    let mut game = Game::<V>::new();
    for &choice in choices {
        let state = game.state();
        let moves = game.legal_moves();

        // 生成した手はすべて盤上で指せる形をしている
        for &mv in moves {
            prop_assert!(
                state.is_pseudo_legal(mv),
                "{} in {}",
                mv.to_usi::<V>(),
                state.to_sfen()
            );
        }
        prop_assert!(!state.in_double_check() || state.in_check());

        // SFENを経由しても同じ局面（ハッシュと王手駒を含む）
        let restored = State::<V>::from_sfen(&state.to_sfen())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(&restored, state);
        prop_assert_eq!(restored.zobrist_hash(), state.zobrist_hash());
        prop_assert_eq!(&state.hflip().hflip(), state);

        // 対局中なら合法手がある
        if !game.result().is_ongoing() {
            prop_assert!(moves.is_empty());
            break;
        }
        prop_assert!(!moves.is_empty());

        let mv = moves[choice as usize % moves.len()];
        prop_assert!(state.is_legal(mv));
        game.apply(mv);
        for c in Color::ALL {
            prop_assert_eq!(game.occupied(c), game.state().board().occupied(c));
            prop_assert_eq!(game.king_location(c), game.state().board().king_location(c));
        }
    }
    Ok(())
}

/// 壊れたSFENでも最後まで読み、書き出したSFENは厳密に読み直せる
fn check_lossy_parse<V: Variant>(sfen: &str) -> Result<(), TestCaseError> {
    let state = State::<V>::from_sfen_lossy(sfen);
    let written = state.to_sfen();
    let restored =
        State::<V>::from_sfen(&written).map_err(|e| TestCaseError::fail(format!("{e}: {written}")))?;
    prop_assert_eq!(restored, state);
    Ok(())
}

/// 任意の16bit値を指し手として与えても対局が壊れない
fn check_arbitrary_moves<V: Variant>(raw: &[u16]) -> Result<(), TestCaseError> {
    let mut game = Game::<V>::new();
    for &data in raw {
        game.apply_nocheck(Move::from_u16(data));
    }
    prop_assert_eq!(game.record_length(), raw.len());
    prop_assert_eq!(game.sfen_at(raw.len(), false), Some(game.to_sfen(false)));
    // 盤上で指せない初手は先手の反則負けで確定する
    if let Some(&first) = raw.first() {
        if !State::<V>::new().is_pseudo_legal(Move::from_u16(first)) {
            prop_assert_eq!(game.result(), GameResult::WhiteWin);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_lossy_sfen_any_string(sfen in ".*") {
        check_lossy_parse::<AnimalShogi>(&sfen)?;
        check_lossy_parse::<Minishogi>(&sfen)?;
        check_lossy_parse::<JudkinsShogi>(&sfen)?;
        check_lossy_parse::<Shogi>(&sfen)?;
    }

    #[test]
    fn prop_lossy_sfen_digit_runs(sfen in "[0-9/+]{0,40}( [bw+0-9]{0,3})?( [0-9A-Za-z]{0,30})?( [0-9]{0,25})?") {
        check_lossy_parse::<AnimalShogi>(&sfen)?;
        check_lossy_parse::<Minishogi>(&sfen)?;
        check_lossy_parse::<JudkinsShogi>(&sfen)?;
        check_lossy_parse::<Shogi>(&sfen)?;
    }

    #[test]
    fn prop_lossy_sfen_piece_soup(sfen in "[0-9/+cCeEgGhHlLkKrRbBsSnNpP]{0,80} [bw] [0-9cCeEgGrRbBsSnNpP-]{0,20}") {
        check_lossy_parse::<AnimalShogi>(&sfen)?;
        check_lossy_parse::<Minishogi>(&sfen)?;
        check_lossy_parse::<JudkinsShogi>(&sfen)?;
        check_lossy_parse::<Shogi>(&sfen)?;
    }

    #[test]
    fn prop_arbitrary_moves_do_not_panic(raw in prop::collection::vec(any::<u16>(), 0..8)) {
        check_arbitrary_moves::<AnimalShogi>(&raw)?;
        check_arbitrary_moves::<Minishogi>(&raw)?;
        check_arbitrary_moves::<JudkinsShogi>(&raw)?;
        check_arbitrary_moves::<Shogi>(&raw)?;
    }

    #[test]
    fn prop_animal_shogi_playout(choices in prop::collection::vec(any::<u16>(), 0..80)) {
        check_playout::<AnimalShogi>(&choices)?;
    }

    #[test]
    fn prop_minishogi_playout(choices in prop::collection::vec(any::<u16>(), 0..80)) {
        check_playout::<Minishogi>(&choices)?;
    }

    #[test]
    fn prop_judkins_shogi_playout(choices in prop::collection::vec(any::<u16>(), 0..80)) {
        check_playout::<JudkinsShogi>(&choices)?;
    }

    #[test]
    fn prop_shogi_playout(choices in prop::collection::vec(any::<u16>(), 0..60)) {
        check_playout::<Shogi>(&choices)?;
    }

    #[test]
    fn prop_packed_hash_round_trip(choices in prop::collection::vec(any::<u16>(), 0..40)) {
        let mut game = Game::<AnimalShogi>::new();
        for choice in choices {
            if !game.result().is_ongoing() {
                break;
            }
            let moves = game.legal_moves();
            let mv = moves[choice as usize % moves.len()];
            game.apply(mv);
            if game.result().is_ongoing() {
                let state = game.state();
                let restored = State::<AnimalShogi>::from_packed_hash(state.packed_hash());
                prop_assert_eq!(restored.map(|s| s.to_sfen()), Some(state.to_sfen()));
            }
        }
    }
}
