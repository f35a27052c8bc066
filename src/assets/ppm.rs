//! Binary PPM (P6) decoder.
//!
//! The whole file is read into memory and sliced — texture files are a
//! few hundred KiB at most. Only 8-bit RGB (`maxval 255`) is accepted.

use std::{fs, io, path::Path};

use thiserror::Error;

/// Decoded RGB image, row-major, arbitrary dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<[u8; 3]>,
}

#[derive(Error, Debug)]
pub enum PpmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("not a binary PPM (P6) file")]
    BadMagic,

    #[error("malformed PPM header")]
    BadHeader,

    #[error("unsupported maxval {0}, only 255 is handled")]
    UnsupportedDepth(u32),

    #[error("pixel data truncated: have {have} bytes, need {need}")]
    Truncated { have: usize, need: usize },
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Image, PpmError> {
    decode(&fs::read(path)?)
}

pub fn decode(bytes: &[u8]) -> Result<Image, PpmError> {
    if bytes.len() < 2 || &bytes[..2] != b"P6" {
        return Err(PpmError::BadMagic);
    }

    let mut cursor = 2;
    let w = read_header_int(bytes, &mut cursor)?;
    let h = read_header_int(bytes, &mut cursor)?;
    let maxval = read_header_int(bytes, &mut cursor)?;
    if maxval != 255 {
        return Err(PpmError::UnsupportedDepth(maxval as u32));
    }
    if w == 0 || h == 0 {
        return Err(PpmError::BadHeader);
    }

    // Exactly one whitespace byte separates the header from the raster.
    cursor += 1;

    let need = w * h * 3;
    let have = bytes.len().saturating_sub(cursor);
    if have < need {
        return Err(PpmError::Truncated { have, need });
    }

    let pixels = bytes[cursor..cursor + need]
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    Ok(Image { w, h, pixels })
}

/// Read the next ASCII integer, skipping whitespace and `#` comments.
fn read_header_int(bytes: &[u8], cursor: &mut usize) -> Result<usize, PpmError> {
    loop {
        match bytes.get(*cursor) {
            Some(b) if b.is_ascii_whitespace() => *cursor += 1,
            Some(b'#') => {
                while !matches!(bytes.get(*cursor), None | Some(b'\n')) {
                    *cursor += 1;
                }
            }
            Some(b) if b.is_ascii_digit() => break,
            _ => return Err(PpmError::BadHeader),
        }
    }

    let mut value: usize = 0;
    while let Some(b) = bytes.get(*cursor) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as usize))
            .ok_or(PpmError::BadHeader)?;
        *cursor += 1;
    }
    Ok(value)
}

/*====================================================================*/
/*                               Tests                                 */
/*====================================================================*/
