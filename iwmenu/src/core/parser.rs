//! Parsing of `iwctl station <dev> get-networks` output.
//!
//! The listing is a coloured table:
//!
//! ```text
//!                                Available networks
//! --------------------------------------------------------------------------------
//!       Network name                      Security            Signal
//! --------------------------------------------------------------------------------
//!   ESC[0m ESC[1;90m> ESC[0m Home         psk                 ****ESC[0m
//!       Office                            psk                 **ESC[1;90m**ESC[0m
//!       Library                           open                ***ESC[1;90m*ESC[0m
//! ```
//!
//! Control-sequence tokens are removed first; the current-network marker is
//! detected explicitly; fields are then read from the right so SSIDs with
//! spaces survive. Malformed lines are skipped, never reported.

use log::debug;

use crate::api::models::{NetworkEntry, SecurityKind, SignalBucket};
use crate::types::constants::signal_glyph;
use crate::util::ansi::{Segment, is_control_only, is_reset, segments, strip_control_sequences};

const CURRENT_MARKER: &str = ">";

/// Parses a raw station listing into secured network entries.
///
/// Entries keep the order in which the tool emitted them. Open networks,
/// headers, separators and anything unparseable are dropped.
pub fn parse_networks(raw: &str) -> Vec<NetworkEntry> {
    raw.lines()
        .filter(|line| !is_header(line) && !is_separator(line))
        .filter(|line| line.contains("psk") || line.contains("WEP"))
        .filter_map(parse_line)
        .collect()
}

fn is_header(line: &str) -> bool {
    let plain = strip_control_sequences(line);
    plain.contains("Network name") && plain.contains("Security") && plain.contains("Signal")
}

fn is_separator(line: &str) -> bool {
    let plain = strip_control_sequences(line);
    let plain = plain.trim();
    !plain.is_empty() && plain.chars().all(|c| c == '-')
}

fn parse_line(line: &str) -> Option<NetworkEntry> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();

    while tokens.last().is_some_and(|t| is_control_only(t)) {
        tokens.pop();
    }

    let mut fields = tokens.into_iter().skip_while(|t| is_control_only(t)).peekable();
    let is_current = fields
        .next_if(|t| strip_control_sequences(t) == CURRENT_MARKER)
        .is_some();
    let fields: Vec<&str> = fields.filter(|t| !is_control_only(t)).collect();

    let [ssid_tokens @ .., security, glyph] = fields.as_slice() else {
        debug!("Skipping short listing line: {:?}", strip_control_sequences(line));
        return None;
    };

    let ssid = ssid_tokens
        .iter()
        .map(|t| strip_control_sequences(t))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if ssid.is_empty() {
        return None;
    }

    let security = SecurityKind::from_token(&strip_control_sequences(security))?;

    let Some(signal) = bucket_from_glyph(glyph) else {
        debug!("Skipping {ssid:?}: unrecognised signal glyph");
        return None;
    };

    Some(NetworkEntry {
        ssid,
        security,
        signal,
        is_current,
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum GlyphState {
    Bright,
    Dim,
    Closed,
}

/// Maps an iwctl signal column to a bucket.
///
/// The column is four `*` cells; the first *n* are bright and the rest are
/// wrapped in a dimming SGR sequence, so *n* is the bucket. Reset sequences
/// around the glyph are ignored. Anything else yields `None`.
pub(crate) fn bucket_from_glyph(token: &str) -> Option<SignalBucket> {
    let mut state = GlyphState::Bright;
    let (mut bright, mut dim) = (0usize, 0usize);

    for segment in segments(token) {
        state = match (state, segment) {
            (GlyphState::Bright, Segment::Char('*')) => {
                bright += 1;
                GlyphState::Bright
            }
            (GlyphState::Dim, Segment::Char('*')) => {
                dim += 1;
                GlyphState::Dim
            }
            (GlyphState::Bright, Segment::Escape(seq)) if is_reset(seq) => {
                if bright == 0 {
                    GlyphState::Bright
                } else {
                    GlyphState::Closed
                }
            }
            (GlyphState::Bright, Segment::Escape(_)) => GlyphState::Dim,
            (GlyphState::Dim, Segment::Escape(seq)) if is_reset(seq) => GlyphState::Closed,
            (GlyphState::Dim, Segment::Escape(_)) => GlyphState::Dim,
            (GlyphState::Closed, Segment::Escape(_)) => GlyphState::Closed,
            (_, Segment::Char(_)) => return None,
        };
    }

    if bright + dim != signal_glyph::CELLS {
        return None;
    }
    SignalBucket::new(bright as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "      Network name                      Security            Signal";
    const SEPARATOR: &str =
        "\x1b[1;90m--------------------------------------------------------------------------------\x1b[0m";

    fn entry(ssid: &str, bucket: u8, is_current: bool) -> NetworkEntry {
        NetworkEntry {
            ssid: ssid.into(),
            security: SecurityKind::Psk,
            signal: SignalBucket::new(bucket).unwrap(),
            is_current,
        }
    }

    #[test]
    fn known_glyphs_map_to_buckets_in_order() {
        let glyphs = [
            "*\x1b[1;90m***\x1b[0m",
            "**\x1b[1;90m**\x1b[0m",
            "***\x1b[1;90m*\x1b[0m",
            "****",
        ];
        let buckets: Vec<u8> = glyphs
            .iter()
            .map(|g| bucket_from_glyph(g).unwrap().value())
            .collect();
        assert_eq!(buckets, vec![1, 2, 3, 4]);
    }

    #[test]
    fn reset_wrapped_glyphs_are_accepted() {
        assert_eq!(bucket_from_glyph("****\x1b[0m").unwrap().value(), 4);
        assert_eq!(bucket_from_glyph("\x1b[0m****").unwrap().value(), 4);
        assert_eq!(
            bucket_from_glyph("\x1b[0m**\x1b[1;90m**\x1b[0m").unwrap().value(),
            2
        );
    }

    #[test]
    fn other_dim_colours_are_accepted() {
        assert_eq!(bucket_from_glyph("***\x1b[2m*\x1b[0m").unwrap().value(), 3);
    }

    #[test]
    fn unknown_glyphs_are_rejected() {
        assert_eq!(bucket_from_glyph("**"), None);
        assert_eq!(bucket_from_glyph("*****"), None);
        assert_eq!(bucket_from_glyph("\x1b[1;90m****\x1b[0m"), None);
        assert_eq!(bucket_from_glyph("-85"), None);
        assert_eq!(bucket_from_glyph("**\x1b[0m**"), None);
        assert_eq!(bucket_from_glyph(""), None);
    }

    #[test]
    fn current_marker_sets_flag() {
        let raw = "  \x1b[0m \x1b[1;90m> \x1b[0m Home     psk     ****\x1b[0m\n";
        assert_eq!(parse_networks(raw), vec![entry("Home", 4, true)]);
    }

    #[test]
    fn leading_reset_without_marker() {
        let raw = "\x1b[0m Office   psk   **\x1b[1;90m**\x1b[0m";
        assert_eq!(parse_networks(raw), vec![entry("Office", 2, false)]);
    }

    #[test]
    fn header_and_separator_only_is_empty() {
        let raw = format!("{SEPARATOR}\n{HEADER}\n{SEPARATOR}\n");
        assert!(parse_networks(&raw).is_empty());
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(parse_networks("").is_empty());
        assert!(parse_networks("\n\n").is_empty());
    }

    #[test]
    fn open_networks_are_dropped() {
        let raw = "Library   open   ***\x1b[1;90m*\x1b[0m\nHome psk ****\n";
        assert_eq!(parse_networks(raw), vec![entry("Home", 4, false)]);
    }

    #[test]
    fn ssid_containing_psk_on_open_network_is_dropped() {
        assert!(parse_networks("mypsk   open   ****").is_empty());
    }

    #[test]
    fn wep_networks_are_kept() {
        let parsed = parse_networks("Legacy   WEP   ***\x1b[1;90m*\x1b[0m");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].security, SecurityKind::Wep);
        assert_eq!(parsed[0].signal.value(), 3);
    }

    #[test]
    fn ssid_with_spaces() {
        let parsed = parse_networks("    Cafe Guest Net        psk      ****");
        assert_eq!(parsed[0].ssid, "Cafe Guest Net");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let raw = "psk\npsk ****\n\x1b[0m psk\nHome psk ?*?*\nOk psk ****";
        assert_eq!(parse_networks(raw), vec![entry("Ok", 4, false)]);
    }

    #[test]
    fn marker_alone_is_not_an_ssid() {
        assert!(parse_networks("\x1b[1;90m> psk ****").is_empty());
    }

    #[test]
    fn emission_order_is_kept() {
        let raw = "Zeta psk *\x1b[1;90m***\x1b[0m\nAlpha psk ****\nMid psk **\x1b[1;90m**\x1b[0m\n";
        let ssids: Vec<_> = parse_networks(raw).into_iter().map(|e| e.ssid).collect();
        assert_eq!(ssids, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn full_listing() {
        let raw = format!(
            "                               Available networks\n\
             {SEPARATOR}\n{HEADER}\n{SEPARATOR}\n\
             \x1b[0m \x1b[1;90m> \x1b[0m Home     psk     ****\x1b[0m\n\
             \x20     Office                            psk                 **\x1b[1;90m**\x1b[0m\n\
             \x20     Library                           open                ***\x1b[1;90m*\x1b[0m\n"
        );
        assert_eq!(
            parse_networks(&raw),
            vec![entry("Home", 4, true), entry("Office", 2, false)]
        );
    }

    #[test]
    fn never_yields_empty_ssid() {
        let noisy = [
            "\x1b[0m \x1b[0m psk ****",
            "   psk   ****",
            "\x1b[0m\x1b[1;90m \x1b[0m WEP **\x1b[1;90m**\x1b[0m",
            "\x1b[0m > psk ****",
        ];
        for raw in noisy {
            assert!(parse_networks(raw).iter().all(|e| !e.ssid.is_empty()));
        }
    }
}
