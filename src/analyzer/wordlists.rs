// English word lists backing the built-in analyzer.

pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

pub const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us", "our", "ours",
    "they", "them", "their", "theirs", "who", "whom", "whose", "what", "which", "this", "that",
    "these", "those", "everyone", "someone", "anyone", "nobody", "everything", "something",
    "nothing", "anything",
];

// Possessives and articles; a verb-looking word right after one of these is a noun ("my work").
pub const DETERMINERS: &[&str] = &[
    "a", "an", "the", "my", "your", "his", "her", "its", "our", "their", "this", "that", "these",
    "those", "some", "any", "every", "each", "no",
];

pub const MODALS: &[&str] = &[
    "will", "would", "can", "could", "shall", "should", "may", "might", "must", "ca", "wo",
];

pub const FUNCTION_WORDS: &[&str] = &[
    "and", "or", "but", "if", "because", "as", "of", "to", "in", "on", "at", "by", "for", "with",
    "from", "into", "about", "over", "under", "than", "so", "nor", "while", "until", "please",
    "yes", "hello", "hi", "bye", "goodbye", "thanks",
];

pub const NEGATORS: &[&str] = &["not", "never", "n't"];

pub const ADVERBS: &[&str] = &[
    "very", "too", "also", "always", "often", "sometimes", "usually", "soon", "now", "here",
    "there", "again", "already", "still", "just", "yet", "ever", "later", "well", "fast", "together",
    "early", "late", "almost", "maybe", "quite", "really",
];

pub const TIME_NOUNS: &[&str] = &["today", "tomorrow", "yesterday", "tonight"];

pub const KNOWN_VERBS: &[&str] = &[
    "be", "have", "do", "go", "come", "eat", "drink", "sleep", "walk", "run", "read", "write",
    "play", "like", "love", "want", "need", "see", "look", "watch", "listen", "hear", "speak",
    "talk", "say", "tell", "ask", "give", "take", "make", "get", "know", "think", "understand",
    "learn", "teach", "study", "work", "help", "call", "meet", "sit", "stand", "open", "close",
    "buy", "sell", "pay", "cook", "wash", "clean", "drive", "ride", "swim", "dance", "sing",
    "live", "stay", "leave", "arrive", "return", "start", "stop", "finish", "wait", "try", "use",
    "bring", "carry", "send", "show", "find", "feel", "become", "begin", "keep", "let", "put",
    "mean", "seem", "turn", "move", "follow", "change", "happen", "remember", "forget",
    "believe", "hope", "wish", "visit", "sign", "draw", "jump", "laugh", "cry", "smile",
];

pub const KNOWN_NOUNS: &[&str] = &[
    "school", "home", "house", "food", "water", "book", "friend", "family", "mother", "father",
    "brother", "sister", "teacher", "student", "class", "college", "office", "market",
    "hospital", "doctor", "name", "time", "day", "week", "month", "year", "morning", "evening",
    "night", "money", "car", "bus", "train", "road", "city", "village", "tea", "milk", "rice",
    "bread", "apple", "fruit", "child", "man", "woman", "person", "boy", "girl", "baby", "dog",
    "cat", "job", "language", "hand", "eye", "phone", "computer", "game", "movie", "shop",
    "room", "door", "window", "table", "chair", "bed", "class", "exam", "lesson", "library",
    "park", "garden", "people", "country", "india", "song", "story", "word", "question",
    "answer", "problem", "mouse", "foot", "tooth", "goose", "church", "box", "bus",
];

pub const KNOWN_ADJECTIVES: &[&str] = &[
    "good", "bad", "happy", "sad", "big", "small", "hot", "cold", "new", "old", "young",
    "beautiful", "hungry", "thirsty", "tired", "sick", "busy", "angry", "ready", "easy",
    "difficult", "important", "nice", "fine", "great", "long", "short", "tall", "slow", "clean",
    "dirty", "rich", "poor", "deaf", "free", "right", "wrong", "late",
];

pub const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
    ("being", "be"), ("has", "have"), ("had", "have"), ("does", "do"), ("did", "do"),
    ("done", "do"), ("went", "go"), ("gone", "go"), ("goes", "go"), ("ate", "eat"),
    ("eaten", "eat"), ("came", "come"), ("ran", "run"), ("saw", "see"), ("seen", "see"),
    ("wrote", "write"), ("written", "write"), ("spoke", "speak"), ("spoken", "speak"),
    ("told", "tell"), ("said", "say"), ("gave", "give"), ("given", "give"), ("took", "take"),
    ("taken", "take"), ("made", "make"), ("got", "get"), ("gotten", "get"), ("knew", "know"),
    ("known", "know"), ("thought", "think"), ("understood", "understand"), ("taught", "teach"),
    ("bought", "buy"), ("sold", "sell"), ("paid", "pay"), ("drove", "drive"),
    ("driven", "drive"), ("rode", "ride"), ("ridden", "ride"), ("swam", "swim"),
    ("swum", "swim"), ("sang", "sing"), ("sung", "sing"), ("left", "leave"),
    ("brought", "bring"), ("sent", "send"), ("found", "find"), ("felt", "feel"),
    ("became", "become"), ("began", "begin"), ("begun", "begin"), ("kept", "keep"),
    ("meant", "mean"), ("met", "meet"), ("sat", "sit"), ("stood", "stand"), ("slept", "sleep"),
    ("drank", "drink"), ("drunk", "drink"), ("heard", "hear"), ("learnt", "learn"),
    ("forgot", "forget"), ("forgotten", "forget"), ("drew", "draw"), ("drawn", "draw"),
];

pub const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"), ("men", "man"), ("women", "woman"), ("mice", "mouse"),
    ("feet", "foot"), ("teeth", "tooth"), ("geese", "goose"),
];

pub const IRREGULAR_ADJECTIVES: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
];

pub const NOUN_SUFFIXES: &[(&str, &str)] = &[
    ("ses", "s"), ("xes", "x"), ("zes", "z"), ("ches", "ch"), ("shes", "sh"), ("men", "man"),
    ("ies", "y"), ("s", ""),
];

pub const VERB_SUFFIXES: &[(&str, &str)] = &[
    ("s", ""), ("ies", "y"), ("es", "e"), ("es", ""), ("ed", "e"), ("ed", ""), ("ing", "e"),
    ("ing", ""),
];

pub const ADJECTIVE_SUFFIXES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

pub const ADJECTIVE_ENDINGS: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish",
];

pub const NOUN_ENDINGS: &[&str] = &["tion", "sion", "ment", "ness", "ity", "ship", "ist"];
