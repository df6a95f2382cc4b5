/// The sample directory a fresh server can start with.
pub const SAMPLE_ENTRIES: &[(&str, &str)] = &[
    ("Arto Hellas", "040-123456"),
    ("Ada Lovelace", "39-44-5323523"),
    ("Dan Abramov", "12-43-234345"),
    ("Mary Poppendieck", "39-23-6423122"),
    ("Edward Tivruski", "021-2142142142"),
];
