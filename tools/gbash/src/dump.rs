use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};

use gba::sim::SimBus;

/// A span of simulated memory to print after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub label: String,
    pub addr: usize,
    pub len: usize,
}

const NAMED: &[(&str, usize, usize)] = &[
    ("io", 0x0400_0000, 0x400),
    ("bg-palette", 0x0500_0000, 0x200),
    ("obj-palette", 0x0500_0200, 0x200),
    ("palette", 0x0500_0000, 0x400),
    ("vram", 0x0600_0000, 0x1_8000),
    ("bg-gfx", 0x0600_0000, 0x1_0000),
    ("obj-gfx", 0x0601_0000, 0x8000),
    ("oam", 0x0700_0000, 0x400),
    ("sram", 0x0E00_0000, 0x1_0000),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    NAMED.iter().map(|(name, ..)| *name)
}

impl FromStr for Span {
    type Err = anyhow::Error;

    /// A region name, or `ADDR:LEN` with either part in hex (`0x`) or decimal.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(&(name, addr, len)) = NAMED.iter().find(|(name, ..)| *name == s) {
            return Ok(Span { label: name.to_string(), addr, len });
        }
        let (addr, len) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("unknown region '{}' (expected one of {} or ADDR:LEN)", s, names().collect::<Vec<_>>().join(", ")))?;
        let addr = number(addr).with_context(|| format!("bad address in '{}'", s))?;
        let len = number(len).with_context(|| format!("bad length in '{}'", s))?;
        if len == 0 {
            bail!("empty span '{}'", s);
        }
        Ok(Span { label: s.to_string(), addr, len })
    }
}

fn number(s: &str) -> Result<usize> {
    Ok(match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16)?,
        None => s.parse()?,
    })
}

/// `hexdump -C` style rows. Repeats of the previous row collapse to `*`.
pub fn hexdump(bus: &SimBus, span: &Span) -> Result<String> {
    let bytes = bus
        .slice(span.addr, span.len)
        .ok_or_else(|| anyhow!("{} ({:#010x}+{:#x}) is not backed by simulated memory", span.label, span.addr, span.len))?;

    let mut out = String::new();
    writeln!(out, "{} @ {:#010x}", span.label, span.addr)?;
    let mut last: Option<&[u8]> = None;
    let mut starred = false;
    for (i, row) in bytes.chunks(16).enumerate() {
        if last == Some(row) {
            if !starred {
                writeln!(out, "*")?;
                starred = true;
            }
            continue;
        }
        last = Some(row);
        starred = false;

        write!(out, "{:08x} ", span.addr + i * 16)?;
        for (j, b) in row.iter().enumerate() {
            if j == 8 {
                out.push(' ');
            }
            write!(out, " {:02x}", b)?;
        }
        for j in row.len()..16 {
            out.push_str(if j == 8 { "    " } else { "   " });
        }
        out.push_str("  |");
        out.extend(row.iter().map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' }));
        out.push_str("|\n");
    }
    writeln!(out, "{:08x}", span.addr + bytes.len())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gba::mmio::Bus;

    #[test]
    fn parse_spans() {
        let oam: Span = "oam".parse().unwrap();
        assert_eq!((oam.addr, oam.len), (0x0700_0000, 0x400));

        let raw: Span = "0x0E000010:32".parse().unwrap();
        assert_eq!((raw.addr, raw.len), (0x0E00_0010, 32));

        assert!("nowhere".parse::<Span>().is_err());
        assert!("0x0E000000:0".parse::<Span>().is_err());
        assert!("0xZZ:4".parse::<Span>().is_err());
    }

    #[test]
    fn rows_and_repeats() {
        let mut bus = SimBus::new();
        for (i, b) in b"Hi!".iter().enumerate() {
            bus.write8(0x0E00_0000 + i, *b);
        }
        let span: Span = "0x0E000000:48".parse().unwrap();
        let text = hexdump(&bus, &span).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "0x0E000000:48 @ 0x0e000000");
        assert!(lines[1].starts_with("0e000000  48 69 21 ff"), "{}", lines[1]);
        assert!(lines[1].ends_with("|Hi!.............|"), "{}", lines[1]);
        assert!(lines[2].starts_with("0e000010  ff ff"), "{}", lines[2]);
        assert_eq!(lines[3], "*");
        assert_eq!(lines[4], "0e000030");
    }

    #[test]
    fn unbacked_span_is_an_error() {
        let bus = SimBus::new();
        let span: Span = "0x08000000:16".parse().unwrap();
        assert!(hexdump(&bus, &span).is_err());
    }
}
