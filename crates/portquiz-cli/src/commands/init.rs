//! The `portquiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let files = [
        ("portquiz.toml", SAMPLE_CONFIG),
        ("Ports.txt", SAMPLE_PORTS),
        ("Protocol_Acronym.txt", SAMPLE_ACRONYMS),
        ("Protocol_Desc.txt", SAMPLE_DESCRIPTIONS),
        ("TCP_UDP.txt", SAMPLE_TRANSPORTS),
    ];

    for (name, content) in files {
        let path = Path::new(name);
        if path.exists() {
            println!("{name} already exists, skipping.");
        } else {
            std::fs::write(path, content).with_context(|| format!("failed to write {name}"))?;
            println!("Created {name}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Add your own facts, one per line, keeping the four files aligned");
    println!("  2. Run: portquiz validate");
    println!("  3. Run: portquiz run");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# portquiz configuration

data_dir = "."
ports_file = "Ports.txt"
acronyms_file = "Protocol_Acronym.txt"
descriptions_file = "Protocol_Desc.txt"
transports_file = "TCP_UDP.txt"

# Uncomment for a repeatable question order.
# seed = 42
"#;

const SAMPLE_PORTS: &str = "20,21
22
23
25
53
67,68
69
80
110
123
143
161,162
389
443
3389
";

const SAMPLE_ACRONYMS: &str = "FTP
SSH
TELNET
SMTP
DNS
DHCP
TFTP
HTTP
POP3
NTP
IMAP
SNMP
LDAP
HTTPS
RDP
";

const SAMPLE_DESCRIPTIONS: &str = "File Transfer Protocol
Secure Shell
Unencrypted remote terminal
Simple Mail Transfer Protocol
Domain Name System
Dynamic Host Configuration Protocol
Trivial File Transfer Protocol
Hypertext Transfer Protocol
Post Office Protocol version 3
Network Time Protocol
Internet Message Access Protocol
Simple Network Management Protocol
Lightweight Directory Access Protocol
HTTP over TLS
Remote Desktop Protocol
";

const SAMPLE_TRANSPORTS: &str = "TCP
TCP
TCP
TCP
TCP,UDP
UDP
UDP
TCP
TCP
UDP
TCP
UDP
TCP,UDP
TCP
TCP,UDP
";
