use crate::{parse_oui, AddressBlock, HardwareAddr, LoadError, DEFAULT_PREFIX_BITS};
use log::{debug, info, trace, warn};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::slice;

/// Byte width every vendor list prefix is widened to.
const OUI_SIZE: usize = 6;

/// First MAC-like token in the pattern field, with an optional `/bits` suffix.
/// Any alphanumeric pair matches; non-hex pairs then fail in `parse_oui` and
/// abort the load.
const PATTERN_REGEX: &str = r"(?P<oui>(?:[0-9a-zA-Z]{2}[-:]){2,5}[0-9a-zA-Z]{2})(?:/(?P<bits>\w+))?";

///
/// An ordered, read-only collection of vendor address blocks.
///
/// Built once from a vendor list with [`OuiDb::load`] or [`OuiDb::from_reader`]
/// and queried afterwards. There is no way to add or remove blocks after the
/// load; build a new database to pick up a new list. Shared references can be
/// handed to as many threads as needed.
///
/// The vendor list is UTF-8 text with one entry per line:
///
/// ```text
/// # comment
/// 00:16:E0<TAB>3Com Ltd
/// 00:1B:C5:09:70:00/36<TAB>Example Narrow Block
/// ```
///
#[derive(Clone, Debug, Default)]
pub struct OuiDb {
    blocks: Vec<AddressBlock>,
}

impl OuiDb {
    /// Reads the vendor list at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<OuiDb, LoadError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let db = OuiDb::from_reader(BufReader::new(file))?;
        info!(
            "loaded {} address blocks from {}",
            db.len(),
            path.display()
        );
        Ok(db)
    }

    /// Builds a database from any line source. The first error aborts the load.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<OuiDb, LoadError> {
        let re = Regex::new(PATTERN_REGEX).expect("vendor pattern regex is valid");
        let mut blocks = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let pattern = fields.next().unwrap_or_default();
            let organization = match fields.next() {
                Some(organization) => organization,
                None => return Err(LoadError::MissingOrganization { line: line_no }),
            };

            let captures = match re.captures(pattern) {
                Some(captures) => captures,
                None => {
                    debug!("line {}: no address prefix in {:?}, skipping", line_no, pattern);
                    continue;
                }
            };

            // "oui" is a required group and present in every match.
            let oui_text = captures.name("oui").map_or("", |m| m.as_str());
            let oui = parse_oui(oui_text, OUI_SIZE).map_err(|cause| LoadError::InvalidPattern {
                line: line_no,
                cause,
            })?;

            let prefix_bits = match captures.name("bits") {
                Some(bits) => parse_prefix_bits(bits.as_str(), line_no)?,
                None => DEFAULT_PREFIX_BITS,
            };

            let block = AddressBlock::new(oui, prefix_bits, organization);
            if !block.is_premasked() {
                warn!(
                    "line {}: prefix {} has bits set past /{}, it will never match",
                    line_no, block.oui, block.prefix_bits
                );
            }
            trace!(
                "line {}: {}/{} -> {}",
                line_no,
                block.oui,
                block.prefix_bits,
                block.organization
            );
            blocks.push(block);
        }

        Ok(OuiDb { blocks })
    }

    /// Returns the first block, in load order, that contains `address`.
    ///
    /// This is a first-match scan, not longest-prefix-match: when blocks
    /// overlap, whichever was loaded first wins.
    pub fn lookup(&self, address: &HardwareAddr) -> Option<&AddressBlock> {
        self.blocks.iter().find(|block| block.contains(address))
    }

    /// Returns the most specific block containing `address`. Blocks with equal
    /// prefix length resolve to the one loaded first.
    pub fn lookup_longest(&self, address: &HardwareAddr) -> Option<&AddressBlock> {
        let mut best: Option<&AddressBlock> = None;
        for block in self.blocks.iter().filter(|block| block.contains(address)) {
            match best {
                Some(current) if current.prefix_bits >= block.prefix_bits => {}
                _ => best = Some(block),
            }
        }
        best
    }

    pub fn blocks(&self) -> &[AddressBlock] {
        &self.blocks
    }

    pub fn iter(&self) -> slice::Iter<AddressBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl<'a> IntoIterator for &'a OuiDb {
    type Item = &'a AddressBlock;
    type IntoIter = slice::Iter<'a, AddressBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

fn parse_prefix_bits(text: &str, line: usize) -> Result<usize, LoadError> {
    match text.parse::<usize>() {
        Ok(bits) if bits <= OUI_SIZE * 8 => Ok(bits),
        _ => Err(LoadError::InvalidPrefixLength {
            line,
            text: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_mac, ParseError};

    fn db(source: &str) -> OuiDb {
        OuiDb::from_reader(source.as_bytes()).unwrap()
    }

    fn org<'a>(db: &'a OuiDb, address: &str) -> Option<&'a str> {
        db.lookup(&parse_mac(address).unwrap())
            .map(|block| block.organization.as_str())
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let db = db("# header\n\n   \n60:03:08\tApple, Inc.\n# 00:16:E0\tnot a record\n");
        assert_eq!(db.len(), 1);
        assert_eq!(db.blocks()[0].prefix_bits, 24);
        assert_eq!(db.blocks()[0].organization, "Apple, Inc.");
    }

    #[test]
    fn skips_lines_without_address_token() {
        let db = db("ff02::1\tall-nodes multicast\n00:16:E0\t3Com Ltd\n");
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn explicit_prefix_length() {
        let db = db("00:1B:C5:09:70:00/36\tNarrow Block\n00-1B-C5\tWide Block\n");
        assert_eq!(db.blocks()[0].prefix_bits, 36);
        assert_eq!(db.blocks()[1].prefix_bits, 24);
        assert_eq!(
            db.blocks()[1].oui,
            HardwareAddr::from([0x00, 0x1b, 0xc5, 0, 0, 0])
        );
    }

    #[test]
    fn token_may_follow_other_text() {
        let db = db("prefix 00:16:E0 (legacy)\t3Com Ltd\n");
        assert_eq!(org(&db, "00:16:e0:3d:f4:4c"), Some("3Com Ltd"));
    }

    #[test]
    fn organization_is_second_field() {
        let db = db("00:00:0C\tCisco\tCisco Systems, Inc\n");
        assert_eq!(db.blocks()[0].organization, "Cisco");
    }

    #[test]
    fn crlf_line_endings() {
        let db = db("60:03:08\tApple, Inc.\r\n00:16:E0\t3Com Ltd\r\n");
        assert_eq!(org(&db, "60:03:08:a0:ec:a6"), Some("Apple, Inc."));
    }

    #[test]
    fn missing_organization_fails() {
        match OuiDb::from_reader("60:03:08\tApple\n00:16:E0 3Com Ltd\n".as_bytes()) {
            Err(LoadError::MissingOrganization { line }) => assert_eq!(line, 2),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn corrupt_token_fails() {
        match OuiDb::from_reader("zz:zz:zz\tNobody\n".as_bytes()) {
            Err(LoadError::InvalidPattern { line, cause }) => {
                assert_eq!(line, 1);
                assert_eq!(cause, ParseError::InvalidHex(String::from("zz:zz:zz")));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn bad_prefix_length_fails() {
        for source in &["60:03:08/x1\tApple\n", "60:03:08/49\tApple\n"] {
            match OuiDb::from_reader(source.as_bytes()) {
                Err(LoadError::InvalidPrefixLength { line: 1, .. }) => {}
                other => panic!("unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn first_match_wins() {
        let db = db("00:1B:C5\tWide Block\n00:1B:C5:09:70:00/36\tNarrow Block\n");
        assert_eq!(org(&db, "00:1b:c5:09:70:01"), Some("Wide Block"));
    }

    #[test]
    fn longest_match_prefers_specific_block() {
        let db = db(
            "00:1B:C5\tWide Block\n\
             00:1B:C5:09:70:00/36\tNarrow Block\n\
             00:1B:C5:09:70:00/36\tDuplicate Block\n",
        );
        let inside = parse_mac("00:1b:c5:09:70:01").unwrap();
        let outside = parse_mac("00:1b:c5:ff:00:01").unwrap();
        assert_eq!(
            db.lookup_longest(&inside).map(|b| b.organization.as_str()),
            Some("Narrow Block")
        );
        assert_eq!(
            db.lookup_longest(&outside).map(|b| b.organization.as_str()),
            Some("Wide Block")
        );
    }

    #[test]
    fn lookup_not_found() {
        let db = db("60:03:08\tApple, Inc.\n");
        assert_eq!(org(&db, "00:00:00:00:00:01"), None);
        // EUI-64 addresses never match 6-byte prefixes.
        assert_eq!(org(&db, "60:03:08:a0:ec:a6:00:00"), None);
    }

    #[test]
    fn lookup_returns_stable_reference() {
        let db = db("60:03:08\tApple, Inc.\n00:16:E0\t3Com Ltd\n");
        let apple = db.lookup(&parse_mac("60:03:08:a0:ec:a6").unwrap()).unwrap();
        let three_com = db.lookup(&parse_mac("00:16:e0:3d:f4:4c").unwrap()).unwrap();
        assert!(std::ptr::eq(apple, &db.blocks()[0]));
        assert_eq!(apple.organization, "Apple, Inc.");
        assert_eq!(three_com.organization, "3Com Ltd");
    }

    #[test]
    fn empty_source_is_empty_db() {
        let db = db("");
        assert!(db.is_empty());
        assert_eq!(db.iter().count(), 0);
    }
}
