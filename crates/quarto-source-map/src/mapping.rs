//! Delta encoding of segment lines into the compact `mappings` string

use crate::error::{SourceMapError, SourceMapResult};
use crate::types::{Segment, SegmentSource};
use crate::vlq::{decode_vlq, encode_vlq};

/// Encode lines of segments into a `mappings` string
///
/// Lines are separated by `;` and segments by `,`. The generated column is
/// relative to the previous segment on the same line; source index, source
/// line, source column and name index are relative to the previous segment
/// that carried them, across lines.
pub fn encode_mappings(lines: &[Vec<Segment>]) -> String {
    let mut out = String::new();
    let mut source_index: i64 = 0;
    let mut source_line: i64 = 0;
    let mut source_column: i64 = 0;
    let mut name_index: i64 = 0;

    for (line_number, segments) in lines.iter().enumerate() {
        if line_number > 0 {
            out.push(';');
        }
        let mut generated_column: i64 = 0;

        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            encode_vlq(segment.generated_column as i64 - generated_column, &mut out);
            generated_column = segment.generated_column as i64;

            let Some(source) = &segment.source else {
                continue;
            };
            encode_vlq(source.source_index as i64 - source_index, &mut out);
            source_index = source.source_index as i64;
            encode_vlq(source.line as i64 - source_line, &mut out);
            source_line = source.line as i64;
            encode_vlq(source.column as i64 - source_column, &mut out);
            source_column = source.column as i64;

            if let Some(name) = source.name_index {
                encode_vlq(name as i64 - name_index, &mut out);
                name_index = name as i64;
            }
        }
    }

    out
}

/// Decode a `mappings` string back into lines of absolute segments
pub fn decode_mappings(mappings: &str) -> SourceMapResult<Vec<Vec<Segment>>> {
    let bytes = mappings.as_bytes();
    let mut lines = vec![Vec::new()];
    let mut pos = 0;

    let mut generated_column: i64 = 0;
    let mut state = [0i64; 4];

    while pos < bytes.len() {
        match bytes[pos] {
            b';' => {
                lines.push(Vec::new());
                generated_column = 0;
                pos += 1;
                continue;
            }
            b',' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let mut fields = Vec::with_capacity(5);
        while pos < bytes.len() && bytes[pos] != b',' && bytes[pos] != b';' {
            let (value, consumed) =
                decode_vlq(&bytes[pos..]).ok_or_else(|| SourceMapError::InvalidMappings {
                    position: pos,
                    message: "malformed VLQ value".to_string(),
                })?;
            fields.push(value);
            pos += consumed;
        }

        if !matches!(fields.len(), 1 | 4 | 5) {
            return Err(SourceMapError::InvalidMappings {
                position: pos,
                message: format!("segment has {} fields", fields.len()),
            });
        }

        generated_column += fields[0];
        let source = if fields.len() >= 4 {
            for (slot, delta) in state.iter_mut().zip(&fields[1..]) {
                *slot += delta;
            }
            Some(SegmentSource {
                source_index: to_u32(state[0], pos)?,
                line: to_u32(state[1], pos)?,
                column: to_u32(state[2], pos)?,
                name_index: if fields.len() == 5 {
                    Some(to_u32(state[3], pos)?)
                } else {
                    None
                },
            })
        } else {
            None
        };

        if let Some(line) = lines.last_mut() {
            line.push(Segment {
                generated_column: to_u32(generated_column, pos)?,
                source,
            });
        }
    }

    Ok(lines)
}

fn to_u32(value: i64, position: usize) -> SourceMapResult<u32> {
    u32::try_from(value).map_err(|_| SourceMapError::InvalidMappings {
        position,
        message: format!("value {} is out of range", value),
    })
}
