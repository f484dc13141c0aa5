use rand::Rng;

use crate::commands::{Command, CommandContext, CommandResult};

const DEFAULT_PING_COUNT: u32 = 4;
const MAX_PING_COUNT: u32 = 20;

pub struct PingCommand;

impl Command for PingCommand {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let mut host = None;
        let mut count = DEFAULT_PING_COUNT;
        let mut i = 0;
        while i < ctx.args.len() {
            if ctx.args[i] == "-c" {
                i += 1;
                count = match ctx.args.get(i).and_then(|c| c.parse::<u32>().ok()) {
                    Some(n) if n > 0 => n.min(MAX_PING_COUNT),
                    _ => return CommandResult::error("ping: invalid count of packets to transmit"),
                };
            } else {
                host = Some(ctx.args[i].clone());
            }
            i += 1;
        }
        let host = match host {
            Some(host) => host,
            None => return CommandResult::error("ping: usage: ping HOST [-c COUNT]"),
        };

        let mut rng = rand::thread_rng();
        let mut lines = vec![format!("PING {}: 56 data bytes", host)];
        let mut total = 0.0;
        for seq in 0..count {
            let ms: f64 = rng.gen_range(5.0..80.0);
            total += ms;
            lines.push(format!("64 bytes from {}: icmp_seq={} ttl=64 time={:.1} ms", host, seq, ms));
        }
        lines.push(format!("--- {} ping statistics ---", host));
        lines.push(format!(
            "{} packets transmitted, {} received, 0% packet loss, avg {:.1} ms",
            count,
            count,
            total / count as f64
        ));
        CommandResult::success(lines)
    }
}

pub struct IfconfigCommand;

impl Command for IfconfigCommand {
    fn name(&self) -> &'static str {
        "ifconfig"
    }

    fn execute(&self, _ctx: &mut CommandContext<'_>) -> CommandResult {
        let lines = [
            "eth0: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500",
            "        inet 10.0.2.15  netmask 255.255.255.0  broadcast 10.0.2.255",
            "        ether 52:54:00:12:34:56",
            "lo: flags=73<UP,LOOPBACK,RUNNING>  mtu 65536",
            "        inet 127.0.0.1  netmask 255.0.0.0",
        ];
        CommandResult::success(lines.iter().map(|l| l.to_string()).collect())
    }
}

pub struct CurlCommand;

impl Command for CurlCommand {
    fn name(&self) -> &'static str {
        "curl"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let url = match ctx.args.iter().find(|a| !a.starts_with('-')) {
            Some(url) => url.clone(),
            None => return CommandResult::error("curl: no URL specified"),
        };
        let host = url
            .split("://")
            .last()
            .and_then(|rest| rest.split('/').next())
            .unwrap_or_default()
            .to_string();
        if host.is_empty() {
            return CommandResult::error(format!("curl: (3) URL using bad/illegal format: {}", url));
        }

        let elapsed: u32 = rand::thread_rng().gen_range(20..400);
        CommandResult::success(vec![
            "HTTP/1.1 200 OK".to_string(),
            format!("Host: {}", host),
            "Content-Type: text/html".to_string(),
            String::new(),
            format!("<html><body>Hello from {}</body></html>", host),
            format!("(simulated response in {} ms)", elapsed),
        ])
    }
}
