//! Bundled sample dataset
//!
//! Twenty users with Spanish genre labels, written with the spelling
//! variants, synonyms and multi-word labels real input tends to have.

use genrematch_core::{LoadOptions, LoadReport, Result, TextNormalizer, UserPreferences};
use std::fs;
use std::path::Path;

pub const SAMPLE_CSV: &str = "\
usuario1,ciencia ficcion,comedia,documental,romance,terror
usuario2,aventura,historia,musical,drama,thriller
usuario3,animacion,accion,fantasia,suspenso,biografia
usuario4,western,crimen,epico,romantico,independiente
usuario5,drama,thriller,accion,ciencia_ficcion,comedia
usuario6,aventura,animacion,superheroes,thriller,catastrofe
usuario7,musical,romance,historia,biografia,familiar
usuario8,scifi,cyberpunk,distopia,accion,suspenso
usuario9,terror,paranormal,gore,thriller,slasher
usuario10,comedia,romantico,buddy movie,parodia,sketch
usuario11,documental,naturaleza,ciencia,historia,biografia
usuario12,fantasia,medieval,epico,aventura,mitologia
usuario13,noir,policiaco,suspenso,investigacion,thriller
usuario14,deportes,competencia,drama,biografia,musical
usuario15,independiente,arte,experimental,festival,drama
usuario16,animacion,infantil,familiar,aventura,comedia
usuario17,ciencia ficcion,espacial,alienigenas,tecnologia,thriller
usuario18,guerra,misterio,road movie,coming of age,zombis
usuario19,vampiros,culto,psicologico,surrealista,animacion adulta
usuario20,mockumentary,romance historico,espionaje,superheroes oscuro,fantasia urbana
";

/// Parse the sample into preference sets
pub fn load(normalizer: &TextNormalizer) -> Result<(UserPreferences, LoadReport)> {
    UserPreferences::from_reader(SAMPLE_CSV.as_bytes(), normalizer, &LoadOptions::default())
}

/// Write the sample to `path`
pub fn write<P: AsRef<Path>>(path: P) -> Result<()> {
    fs::write(path, SAMPLE_CSV)?;
    Ok(())
}
