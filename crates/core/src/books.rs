/// Source code -> rulebook title.
pub const SOURCE_BOOKS: &[(&str, &str)] = &[
    ("SHB2", "Schattenhandbuch 2 (German Handbook)"),
    ("BB", "Bullets & Bandages"),
    ("HS", "Howling Shadows"),
    ("HT", "Hard Targets"),
    ("DTD", "Data Trails (Dissonant Echoes)"),
    ("FA", "Forbidden Arcana"),
    ("DT", "Data Trails"),
    ("2050", "Shadowrun 2050 (5th Edition)"),
    ("BOTL", "Book of the Lost"),
    ("SASS", "Sail Away, Sweet Sister"),
    ("HKS", "Hong Kong Sourcebook"),
    ("TCT", "The Complete Trog"),
    ("SPS", "Splintered State"),
    ("SAG", "State of the Art ADL (German Handbook)"),
    ("RF", "Run Faster"),
    ("RG", "Run & Gun"),
    ("SR4", "Shadowrun, Fourth Edition"),
    ("SR5", "Shadowrun, Fifth Edition"),
    ("TVG", "The Vladivostok Gauntlet"),
    ("SGG", "Street Grimoire (German-exclusive Content)"),
    ("R5", "Rigger 5.0"),
    ("CA", "Cutting Aces"),
    ("CF", "Chrome Flesh"),
    ("AP", "Assassin's Primer"),
    ("WAR", "WAR!"),
    ("GH3", "Gun Heaven 3"),
    ("SS", "Stolen Souls"),
    ("SFB", "Shadows In Focus: Butte"),
    ("SSP", "Shadow Spells"),
    ("LCD", "Lockdown"),
    ("SG", "Street Grimoire"),
];

pub fn book_title(code: &str) -> Option<&'static str> {
    SOURCE_BOOKS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, title)| *title)
}

/// Title for `code`, or the code itself when it is not a known book.
pub fn resolve_book(code: &str) -> &str {
    book_title(code).unwrap_or(code)
}
