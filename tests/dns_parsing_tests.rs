mod common;

use common::{assert_same_packet, create_test_query, create_test_response, init_tracing};
use dnscodec::dns::{
    DNSPacket, Section, each,
    enums::{DNSResourceClass, DNSResourceType},
    rdata::DNSRecordData,
    record::DNSRecord,
};

// Sample DNS query packet for google.com (A record)
// This is a real DNS query captured from dig google.com
const GOOGLE_COM_QUERY: &[u8] = &[
    0x12, 0x34, // Transaction ID
    0x01, 0x00, // Flags: Standard query
    0x00, 0x01, // Questions: 1
    0x00, 0x00, // Answer RRs: 0
    0x00, 0x00, // Authority RRs: 0
    0x00, 0x00, // Additional RRs: 0
    // Question section
    0x06, b'g', b'o', b'o', b'g', b'l', b'e', // "google"
    0x03, b'c', b'o', b'm', // "com"
    0x00, // Root label
    0x00, 0x01, // Type: A
    0x00, 0x01, // Class: IN
];

#[test]
fn test_parse_dns_header() {
    init_tracing();
    let packet = DNSPacket::parse(GOOGLE_COM_QUERY).expect("Failed to parse packet");

    assert_eq!(packet.header.id, 0x1234);
    assert!(!packet.header.qr); // Query
    assert_eq!(packet.header.opcode, 0); // Standard query
    assert!(!packet.header.aa);
    assert!(!packet.header.tc);
    assert!(packet.header.rd); // Recursion desired
    assert!(!packet.header.ra);
    assert_eq!(packet.header.z, 0);
    assert_eq!(packet.header.rcode, 0);
    assert_eq!(packet.header.qdcount, 1);
    assert_eq!(packet.header.ancount, 0);
    assert_eq!(packet.header.nscount, 0);
    assert_eq!(packet.header.arcount, 0);
}

#[test]
fn test_parse_dns_question() {
    let packet = DNSPacket::parse(GOOGLE_COM_QUERY).expect("Failed to parse packet");

    assert_eq!(packet.questions.len(), 1);

    let question = &packet.questions[0];
    assert_eq!(question.name, "google.com");
    assert_eq!(question.rtype, DNSResourceType::A);
    assert_eq!(question.rclass, DNSResourceClass::IN);
    assert_eq!(question.ttl, None);
    assert_eq!(question.data, DNSRecordData::Empty);
}

#[test]
fn test_query_serializes_to_captured_bytes() {
    let mut packet = create_test_query("google.com", DNSResourceType::A);
    packet.header.id = 0x1234;
    let bytes = packet.to_buffer().expect("Failed to serialize packet");
    assert_eq!(bytes, GOOGLE_COM_QUERY);
}

#[test]
fn test_example_com_response_bytes() {
    let packet = create_test_response(0xABCD, "example.com", &["93.184.216.34"]);
    let bytes = packet.to_buffer().unwrap();

    let expected = hex::decode(concat!(
        "abcd81800001000100000000",
        "076578616d706c6503636f6d0000010001",
        "c00c000100010000012c00045db8d822",
    ))
    .unwrap();
    assert_eq!(bytes, expected);
}

#[test]
fn test_roundtrip_all_supported_types() {
    init_tracing();
    let mut packet = create_test_response(7, "example.com", &["93.184.216.34"]);
    packet.answers.extend([
        DNSRecord::new("example.com", DNSResourceType::AAAA, DNSResourceClass::IN)
            .with_data(DNSRecordData::AAAA("2606:2800:220:1:248:1893:25c8:1946".parse().unwrap())),
        DNSRecord::new("www.example.com", DNSResourceType::CNAME, DNSResourceClass::IN)
            .with_data(DNSRecordData::CNAME("example.com".to_string())),
        DNSRecord::new("34.216.184.93.in-addr.arpa", DNSResourceType::PTR, DNSResourceClass::IN)
            .with_data(DNSRecordData::PTR("example.com".to_string())),
        DNSRecord::new("example.com", DNSResourceType::TXT, DNSResourceClass::IN)
            .with_data(DNSRecordData::TXT(vec![b"v=spf1 -all".to_vec()])),
        DNSRecord::new("example.com", DNSResourceType::MX, DNSResourceClass::IN).with_data(
            DNSRecordData::MX {
                preference: 10,
                exchange: "mail.example.com".to_string(),
            },
        ),
    ]);
    packet.authorities.push(
        DNSRecord::new("example.com", DNSResourceType::NS, DNSResourceClass::IN)
            .with_data(DNSRecordData::NS("a.iana-servers.net".to_string())),
    );
    packet.additionals.push(
        DNSRecord::new("a.iana-servers.net", DNSResourceType::A, DNSResourceClass::IN)
            .with_ttl(0)
            .with_data(DNSRecordData::A("199.43.135.53".parse().unwrap())),
    );

    let bytes = packet.to_buffer().unwrap();
    assert_same_packet(&bytes, &packet);
}

#[test]
fn test_unknown_type_passthrough() {
    let mut packet = create_test_query("example.com", DNSResourceType::Unknown(65400));
    packet.header.qr = true;
    packet.answers.push(
        DNSRecord::new("example.com", DNSResourceType::Unknown(65400), DNSResourceClass::IN)
            .with_data(DNSRecordData::Raw(vec![0x00, 0xFF, 0xC0, 0x0C, 0x7F])),
    );

    let bytes = packet.to_buffer().unwrap();
    let rdata = &bytes[bytes.len() - 5..];
    assert_eq!(rdata, &[0x00, 0xFF, 0xC0, 0x0C, 0x7F]);

    let parsed = DNSPacket::parse(&bytes).unwrap();
    assert_eq!(parsed.answers[0].type_name(), "TYPE65400");
    assert_eq!(parsed.to_buffer().unwrap(), bytes);
}

#[test]
fn test_each_filters_by_type() {
    let mut packet = create_test_response(1, "example.com", &["10.0.0.1", "10.0.0.2"]);
    packet.answers.push(
        DNSRecord::new("example.com", DNSResourceType::AAAA, DNSResourceClass::IN)
            .with_data(DNSRecordData::AAAA("::1".parse().unwrap())),
    );

    let mut addresses = Vec::new();
    each(&packet.answers, Some(DNSResourceType::A), |record| {
        addresses.push(record.data.to_string());
    });
    assert_eq!(addresses, vec!["10.0.0.1", "10.0.0.2"]);

    let mut count = 0;
    each(&packet.answers, None, |_| count += 1);
    assert_eq!(count, 3);

    let names: Vec<_> = packet
        .records(Section::Question, None)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["example.com"]);
}

#[test]
fn test_packet_json_roundtrip() {
    let packet = create_test_response(42, "example.com", &["192.0.2.1"]);
    let json = serde_json::to_string(&packet).unwrap();
    let back: DNSPacket = serde_json::from_str(&json).unwrap();
    assert_eq!(back, packet);
}
