use std::fmt::{self, Display, Formatter};

use icmp6_wire::packet::icmp6::{Icmp6Packet, Icmp6Type};

/// Counters accumulated over a dump run.
#[derive(Default, Debug, Clone)]
pub struct Stats {
    // General statistics
    pub total_messages: u64,
    pub total_bytes: u64,
    pub parse_errors: u64,

    // Message types
    pub echo_request: u64,
    pub echo_reply: u64,
    pub router_solicit: u64,
    pub router_advert: u64,
    pub neighbor_solicit: u64,
    pub neighbor_advert: u64,
    pub redirect: u64,
    pub dest_unreachable: u64,
    pub time_exceeded: u64,
    pub other: u64,

    // Contents
    pub options: u64,
    pub extension_objects: u64,
    pub checksum_ok: u64,
    pub checksum_bad: u64,
}

impl Stats {
    pub fn record(&mut self, packet: &Icmp6Packet, wire_len: usize) {
        self.total_messages += 1;
        self.total_bytes += wire_len as u64;

        match packet.msg_type() {
            Icmp6Type::ECHO_REQUEST => self.echo_request += 1,
            Icmp6Type::ECHO_REPLY => self.echo_reply += 1,
            Icmp6Type::ROUTER_SOLICIT => self.router_solicit += 1,
            Icmp6Type::ROUTER_ADVERT => self.router_advert += 1,
            Icmp6Type::NEIGHBOR_SOLICIT => self.neighbor_solicit += 1,
            Icmp6Type::NEIGHBOR_ADVERT => self.neighbor_advert += 1,
            Icmp6Type::REDIRECT => self.redirect += 1,
            Icmp6Type::DEST_UNREACHABLE => self.dest_unreachable += 1,
            Icmp6Type::TIME_EXCEEDED => self.time_exceeded += 1,
            _ => self.other += 1,
        }

        self.options += packet.options().len() as u64;
        self.extension_objects += packet.extensions().objects().len() as u64;
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Statistics ---")?;
        writeln!(f, "Total messages:       {:>8}", self.total_messages)?;
        writeln!(f, "Total bytes:          {:>8}", self.total_bytes)?;
        writeln!(f, "Parse errors:         {:>8}", self.parse_errors)?;
        writeln!(f, "Echo request:         {:>8}", self.echo_request)?;
        writeln!(f, "Echo reply:           {:>8}", self.echo_reply)?;
        writeln!(f, "Router solicitation:  {:>8}", self.router_solicit)?;
        writeln!(f, "Router advertisement: {:>8}", self.router_advert)?;
        writeln!(f, "Neighbor solicitation:{:>8}", self.neighbor_solicit)?;
        writeln!(f, "Neighbor advert:      {:>8}", self.neighbor_advert)?;
        writeln!(f, "Redirect:             {:>8}", self.redirect)?;
        writeln!(f, "Dest unreachable:     {:>8}", self.dest_unreachable)?;
        writeln!(f, "Time exceeded:        {:>8}", self.time_exceeded)?;
        writeln!(f, "Other types:          {:>8}", self.other)?;
        writeln!(f, "ND options:           {:>8}", self.options)?;
        writeln!(f, "Extension objects:    {:>8}", self.extension_objects)?;
        if self.checksum_ok + self.checksum_bad > 0 {
            writeln!(f, "Checksum ok:          {:>8}", self.checksum_ok)?;
            writeln!(f, "Checksum bad:         {:>8}", self.checksum_bad)?;
        }
        Ok(())
    }
}
