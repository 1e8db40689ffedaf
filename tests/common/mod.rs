//! Common test utilities for dnscodec tests

#![allow(dead_code)] // Not every test file uses every helper

use dnscodec::dns::{
    DNSPacket,
    constants::PacketFlag,
    enums::{DNSResourceClass, DNSResourceType},
    header::DNSHeader,
    rdata::DNSRecordData,
    record::DNSRecord,
};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber honouring RUST_LOG, once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Create a basic test DNS query packet
pub fn create_test_query(domain: &str, qtype: DNSResourceType) -> DNSPacket {
    create_test_query_with_id(1234, domain, qtype)
}

/// Create a test DNS query packet with specific ID
pub fn create_test_query_with_id(id: u16, domain: &str, qtype: DNSResourceType) -> DNSPacket {
    DNSPacket {
        header: DNSHeader {
            id,
            rd: true,
            ..Default::default()
        },
        questions: vec![DNSRecord::question(domain, qtype, DNSResourceClass::IN)],
        ..Default::default()
    }
}

/// Create a response answering `domain` with the given A addresses
pub fn create_test_response(id: u16, domain: &str, addresses: &[&str]) -> DNSPacket {
    let mut packet = DNSPacket::new(PacketFlag::RESPONSE | PacketFlag::RECURSION);
    packet.header.id = id;
    packet.header.ra = true;
    packet.questions.push(DNSRecord::question(
        domain,
        DNSResourceType::A,
        DNSResourceClass::IN,
    ));
    for address in addresses {
        packet.answers.push(
            DNSRecord::new(domain, DNSResourceType::A, DNSResourceClass::IN)
                .with_ttl(300)
                .with_data(DNSRecordData::A(address.parse().expect("valid IPv4"))),
        );
    }
    packet
}

/// Parse `bytes` as a single message and compare to `expected`, ignoring
/// the header counts which are recomputed on encode
pub fn assert_same_packet(bytes: &[u8], expected: &DNSPacket) {
    let mut parsed = DNSPacket::parse(bytes).expect("Failed to parse packet");
    parsed.header.qdcount = expected.header.qdcount;
    parsed.header.ancount = expected.header.ancount;
    parsed.header.nscount = expected.header.nscount;
    parsed.header.arcount = expected.header.arcount;
    assert_eq!(&parsed, expected);
}
