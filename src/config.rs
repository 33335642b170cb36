/// Fixed endpoints, storage keys and limits

// Storage keys
pub const API_KEY_KEY: &str = "openaiApiKey";
pub const URL_FLASHCARDS_KEY: &str = "urlFlashcards";
pub const HIGHLIGHTS_KEY: &str = "flashcards";

// Completion API
pub const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const COMPLETION_MODEL: &str = "gpt-3.5-turbo";
pub const SYSTEM_PROMPT: &str = "Generate a question and answer pair for a flashcard based on the given text. Return as JSON with \"question\" and \"answer\" fields.";

// AnkiConnect
pub const ANKI_CONNECT_URL: &str = "http://localhost:8765";
pub const ANKI_CONNECT_VERSION: u32 = 6;
pub const NOTE_MODEL: &str = "Basic";
pub const NOTE_TAG: &str = "web-clipper";
pub const DEFAULT_DECK: &str = "Web Articles";
pub const DECK_NAME_MAX_CHARS: usize = 50;

// Context menu
pub const MENU_ID: &str = "save-highlight";
pub const MENU_TITLE: &str = "Save as Anki Flashcard";

// Extraction
pub const MIN_SENTENCE_CHARS: usize = 30;
pub const CARD_COUNT_CHOICES: [usize; 4] = [1, 3, 5, 10];
pub const DEFAULT_CARD_COUNT: usize = 5;
