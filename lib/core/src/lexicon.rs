//! Built-in lexical tables for film genres
//!
//! These are the defaults used when no external definition is supplied.
//! Every entry is already in canonical form (lower-case, accent-free).

/// Synonym groups keyed by canonical genre.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("ciencia_ficcion", &["scifi", "ciencia ficcion", "ficcion_cientifica"]),
    ("terror", &["miedo", "horror", "suspenso"]),
    ("comedia", &["risa", "humor", "divertido"]),
    ("drama", &["serio", "emocional", "intenso"]),
    ("accion", &["aventura", "emocion", "movimiento"]),
    ("romance", &["amor", "pasion", "sentimental"]),
    ("fantasia", &["magia", "imaginacion", "sobrenatural"]),
    ("documental", &["realidad", "informacion", "educativo"]),
    ("animacion", &["dibujos", "cartoon", "animado"]),
    ("thriller", &["suspense", "tension", "emocionante"]),
    ("musical", &["musica", "cantos", "baile"]),
    ("aventura", &["exploracion", "viaje", "descubrimiento"]),
    ("biografia", &["vida", "historia_personal", "real"]),
    ("historia", &["historico", "epoca", "pasado"]),
    ("crimen", &["delito", "policial", "investigacion"]),
    ("western", &["vaquero", "frontera", "oeste"]),
];

/// Common misspellings and foreign variants keyed by canonical genre.
pub const PARONYMS: &[(&str, &[&str])] = &[
    ("accion", &["acion", "axion"]),
    ("comedia", &["komedia"]),
    ("drama", &["dramma"]),
    ("terror", &["teror"]),
    ("romance", &["romanse"]),
    ("fantasia", &["fantasy"]),
    ("ciencia_ficcion", &["sci fi", "sci_fi"]),
    ("animacion", &["animation"]),
    ("thriller", &["triller"]),
    ("aventura", &["adventura", "adventure"]),
    ("biografia", &["biography"]),
    ("historia", &["history"]),
    ("musical", &["music"]),
    ("crimen", &["crime"]),
    ("western", &["wester"]),
];

/// Genre ontology: canonical genre to its directly related genres.
pub const ONTOLOGY: &[(&str, &[&str])] = &[
    (
        "ciencia_ficcion",
        &["cyberpunk", "distopia", "espacial", "alienigenas", "tecnologia", "futuro", "scifi"],
    ),
    (
        "terror",
        &["paranormal", "gore", "slasher", "psicologico", "vampiros", "zombis", "miedo", "horror"],
    ),
    (
        "aventura",
        &["epico", "superheroes", "road_movie", "exploracion", "viaje", "descubrimiento"],
    ),
    (
        "drama",
        &["biografia", "psicologico", "coming_of_age", "independiente", "emocional", "serio"],
    ),
    (
        "comedia",
        &["romantico", "parodia", "sketch", "buddy_movie", "mockumentary", "humor", "risa"],
    ),
    (
        "thriller",
        &["suspenso", "policiaco", "espionaje", "misterio", "noir", "tension", "emocionante"],
    ),
    ("romance", &["romantico", "romance_historico", "amor", "pasion", "sentimental"]),
    (
        "fantasia",
        &["medieval", "mitologia", "fantasia_urbana", "epico", "magia", "sobrenatural"],
    ),
    ("animacion", &["infantil", "familiar", "animacion_adulta", "dibujos", "cartoon"]),
    ("accion", &["superheroes", "guerra", "epico", "lucha", "pelea", "emocion"]),
    (
        "documental",
        &["naturaleza", "ciencia", "historia", "biografia", "realidad", "educativo"],
    ),
    (
        "historia",
        &["biografia", "epico", "guerra", "romance_historico", "historico", "epoca"],
    ),
    ("musical", &["familiar", "romance", "biografia", "musica", "baile", "cantos"]),
    ("western", &["epico", "aventura", "vaquero", "frontera", "oeste"]),
    ("crimen", &["noir", "policiaco", "thriller", "delito", "investigacion"]),
    ("independiente", &["arte", "experimental", "festival", "alternativo"]),
];

/// Spanish stop words (accent-stripped, matching normalized tokens).
pub const STOP_WORDS: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "del", "se", "las", "por", "un", "para",
    "con", "no", "una", "su", "al", "lo", "como", "mas", "pero", "sus", "le", "ya", "o", "este",
    "si", "porque", "esta", "entre", "cuando", "muy", "sin", "sobre", "tambien", "me", "hasta",
    "hay", "donde", "quien", "desde", "todo", "nos", "durante", "todos", "uno", "les", "ni",
    "contra", "otros", "ese", "eso", "ante", "ellos", "e", "esto", "mi", "antes", "algunos",
    "unos", "yo", "otro", "otras", "otra", "tanto", "esa", "estos", "mucho", "quienes", "nada",
    "muchos", "cual", "poco", "ella", "estar", "estas", "algunas", "algo", "nosotros", "mis",
    "tu", "te", "ti", "tus", "ellas", "nosotras", "vosotros", "vosotras", "os", "mio", "mia",
    "mios", "mias", "tuyo", "tuya", "tuyos", "tuyas", "suyo", "suya", "suyos", "suyas",
    "nuestro", "nuestra", "nuestros", "nuestras", "vuestro", "vuestra", "vuestros", "vuestras",
    "esos", "esas", "estoy", "estamos", "estais", "estan", "estes", "estemos", "esteis",
    "esten", "estare", "estaras", "estara", "estaremos", "estareis", "estaran", "estaba",
    "estabas", "estabamos", "estabais", "estaban", "estuve", "estuviste", "estuvo", "estuvimos",
    "estuvieron", "he", "has", "ha", "hemos", "habeis", "han", "haya", "hayas", "hayamos",
    "hayan", "habia", "habias", "habiamos", "habian", "hube", "hubo", "hubieron", "soy", "eres",
    "es", "somos", "sois", "son", "sea", "seas", "seamos", "sean", "sere", "seras", "sera",
    "seremos", "seran", "era", "eras", "eramos", "eran", "fui", "fue", "fuimos", "fueron",
    "fuera", "fueran", "tengo", "tienes", "tiene", "tenemos", "teneis", "tienen", "tenga",
    "tengan", "tenia", "tenian", "tuve", "tuvo", "tuvieron", "cada", "mismo", "misma", "asi",
    "aqui", "ahi", "alli", "luego", "pues", "aunque", "segun", "tal", "cuyo",
];
