//! Internationalization: UI text translations for English and German.
//!
//! Only engine-drawn UI text goes through here (HUD, overlays, panels).
//! Dock and truck labels are warehouse signage and stay in English.
//! The bitmap font has no umlauts, German text spells them out.

pub use dispatcher_common::Language;

/// All translatable UI strings, looked up by key.
/// Returns the translated string or "???" if the key is not found.
pub fn t(lang: Language, key: &str) -> &'static str {
    match (lang, key) {
        // ── HUD ──
        (Language::En, "hud_score") => "SCORE",
        (Language::De, "hud_score") => "PUNKTE",
        (Language::En, "hud_time") => "TIME",
        (Language::De, "hud_time") => "ZEIT",
        (Language::En, "hud_level") => "LEVEL",
        (Language::De, "hud_level") => "LEVEL",
        (Language::En, "hud_best") => "BEST",
        (Language::De, "hud_best") => "REKORD",
        (Language::En, "combo") => "COMBO",
        (Language::De, "combo") => "COMBO",
        (Language::En, "sound_off") => "SOUND OFF",
        (Language::De, "sound_off") => "TON AUS",

        // ── Menu overlay ──
        (Language::En, "menu_title") => "READY TO DISPATCH?",
        (Language::De, "menu_title") => "BEREIT ZUM VERLADEN?",
        (Language::En, "menu_hint") => "Press ENTER to begin!",
        (Language::De, "menu_hint") => "ENTER druecken zum Starten!",
        (Language::En, "menu_keys") => "1-3 level | L leaderboard | G language | M sound | Q quit",
        (Language::De, "menu_keys") => "1-3 Level | L Bestenliste | G Sprache | M Ton | Q Ende",

        // ── Pause overlay ──
        (Language::En, "paused") => "PAUSED",
        (Language::De, "paused") => "PAUSE",
        (Language::En, "pause_hint") => "P or Esc to resume",
        (Language::De, "pause_hint") => "P oder Esc zum Weiterspielen",

        // ── Game over ──
        (Language::En, "game_over") => "SHIFT OVER!",
        (Language::De, "game_over") => "FEIERABEND!",
        (Language::En, "final_score") => "Final score",
        (Language::De, "final_score") => "Endstand",
        (Language::En, "best_combo") => "Best combo",
        (Language::De, "best_combo") => "Beste Combo",
        (Language::En, "new_rank") => "Leaderboard rank",
        (Language::De, "new_rank") => "Platz in der Bestenliste",
        (Language::En, "again_hint") => "ENTER to play again | L leaderboard",
        (Language::De, "again_hint") => "ENTER fuer neue Runde | L Bestenliste",

        // ── Leaderboard ──
        (Language::En, "leaderboard_title") => "TOP DISPATCHERS",
        (Language::De, "leaderboard_title") => "BESTE DISPONENTEN",
        (Language::En, "leaderboard_empty") => "No scores yet! Be the first to play!",
        (Language::De, "leaderboard_empty") => "Noch keine Punkte! Spiel als Erster!",
        (Language::En, "leaderboard_points") => "points",
        (Language::De, "leaderboard_points") => "Punkte",
        (Language::En, "leaderboard_hint") => "L to close",
        (Language::De, "leaderboard_hint") => "L zum Schliessen",

        // ── Fallback ──
        _ => "???",
    }
}
