use std::io;
use std::path::{Path, PathBuf};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Resolves a tokenizer directory (e.g. a `save_pretrained` folder) to its `tokenizer.json`.
pub fn resolve_tokenizer_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join("tokenizer.json")
    } else {
        path.to_path_buf()
    }
}

/// Loads a tokenizer from a directory or an explicit `tokenizer.json` path.
pub fn load_tokenizer(path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = resolve_tokenizer_path(path);
    if !tokenizer_path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("tokenizer not found: {}", tokenizer_path.display()),
        ));
    }

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer that truncates and pads every input to exactly `max_len` tokens.
pub fn load_tokenizer_fixed_length(
    path: &Path,
    max_len: usize,
    pad_id: u32,
) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(path)?;
    configure_fixed_length(&mut tokenizer, max_len, pad_id)?;
    Ok(tokenizer)
}

/// Enables truncation and fixed-length padding to `max_len`.
///
/// An existing padding section in `tokenizer.json` keeps its pad token; otherwise the
/// encoder's `pad_id` is used.
pub fn configure_fixed_length(
    tokenizer: &mut Tokenizer,
    max_len: usize,
    pad_id: u32,
) -> io::Result<()> {
    let (pad_id, pad_token) = match tokenizer.get_padding() {
        Some(existing) => (existing.pad_id, existing.pad_token.clone()),
        None => {
            let pad_token = tokenizer
                .id_to_token(pad_id)
                .unwrap_or_else(|| "<pad>".to_string());
            (pad_id, pad_token)
        }
    };

    tokenizer.with_padding(Some(PaddingParams {
        strategy: PaddingStrategy::Fixed(max_len),
        pad_id,
        pad_token,
        ..Default::default()
    }));

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    Ok(())
}
