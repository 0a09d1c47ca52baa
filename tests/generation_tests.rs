#[cfg(test)]
mod generation_tests {
    use std::collections::{BTreeMap, HashSet};
    use std::fs;
    use std::io::Write;
    use std::net::Ipv4Addr;
    use std::path::Path;
    use tempfile::{tempdir, NamedTempFile};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use gensynet::config::Config;
    use gensynet::config_loader::load_config;
    use gensynet::ip::IpLayout;
    use gensynet::orchestrator::{build_allocation, generate_network};
    use gensynet::roles::{default_role_distribution, Role, RoleCount};
    use gensynet::synth::{write_hosts_to_file, HostRecord};
    use gensynet::topology::{
        allocate, count_subnets, default_bands, plan_subnets, AllocationError, DensityBand, PlanError,
        Subnet, DEFAULT_BANDS, SINGLE_BAND,
    };
    use gensynet::utils::ValidationError;

    fn read_hosts(path: &Path) -> Vec<HostRecord> {
        let content = fs::read_to_string(path).unwrap();
        serde_json::Deserializer::from_str(&content)
            .into_iter::<HostRecord>()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    fn block_of(addr: &str) -> [u8; 3] {
        let ip: Ipv4Addr = addr.split('/').next().unwrap().parse().unwrap();
        let [a, b, c, _] = ip.octets();
        [a, b, c]
    }

    /// Full run into a temp directory, checking the emitted records
    #[test]
    fn test_generate_network_end_to_end() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("network.json");

        let mut config = Config::with_nodes(1000);
        config.general.seed = Some(1);
        config.network.domain = Some("acme.local".to_string());
        config.output.path = Some(output.clone());

        let report = generate_network(&config).unwrap();
        assert_eq!(report.hosts, 1000);
        assert_eq!(report.output_path, output);
        assert_eq!(report.subnets, count_subnets(1000, &DEFAULT_BANDS).unwrap());

        let hosts = read_hosts(&output);
        assert_eq!(hosts.len(), 1000);

        let mut ips = HashSet::new();
        let mut totals = RoleCount::zeroed();
        for host in &hosts {
            assert!(ips.insert(host.ip.clone()), "duplicate IP {}", host.ip);
            assert_eq!(block_of(&host.ip), block_of(&host.netmask));
            assert!(!host.ip.ends_with(".0") && !host.ip.ends_with(".255"));
            assert_eq!(host.rdns_domain.as_deref(), Some("acme.local"));
            assert_eq!(host.os.confidence.is_none(), host.os.os == "Unknown");
            totals.add(host.role.role, 1);
        }
        assert_eq!(totals, report.roles);
        assert_eq!(totals, default_role_distribution(1000));
    }

    #[test]
    fn test_compact_output_is_one_record_per_line() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("compact.json");

        let mut config = Config::with_nodes(120);
        config.general.seed = Some(2);
        config.output.path = Some(output.clone());
        config.output.pretty = false;
        config.network.ip_layout = IpLayout::Sequential;

        generate_network(&config).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 120);
        for line in lines {
            let host: HostRecord = serde_json::from_str(line).unwrap();
            let last: u8 = host.ip.rsplit('.').next().unwrap().parse().unwrap();
            assert!((1..=254).contains(&last));
        }
    }

    /// Same seed, same network (timestamps aside)
    #[test]
    fn test_seeded_runs_are_reproducible() {
        let dir = tempdir().unwrap();
        let run = |name: &str| {
            let mut config = Config::with_nodes(300);
            config.general.seed = Some(77);
            config.output.path = Some(dir.path().join(name));
            let report = generate_network(&config).unwrap();
            let hosts = read_hosts(&report.output_path);
            (report.domain, hosts)
        };

        let (domain_a, hosts_a) = run("a.json");
        let (domain_b, hosts_b) = run("b.json");
        assert_eq!(domain_a, domain_b);
        assert_eq!(hosts_a.len(), hosts_b.len());
        for (a, b) in hosts_a.iter().zip(&hosts_b) {
            assert_eq!(a.uid, b.uid);
            assert_eq!(a.mac, b.mac);
            assert_eq!(a.ip, b.ip);
            assert_eq!(a.role, b.role);
            assert_eq!(a.os, b.os);
        }
    }

    #[test]
    fn test_default_bands_five_hundred_nodes() {
        assert_eq!(count_subnets(500, &DEFAULT_BANDS).unwrap(), 7);

        let subnets = plan_subnets(500, &DEFAULT_BANDS).unwrap();
        let capacities: Vec<usize> = subnets.iter().map(|s| s.capacity).collect();
        assert_eq!(capacities, vec![150, 50, 50, 50, 50, 25, 125]);
    }

    #[test]
    fn test_small_network_uses_single_subnet() {
        assert_eq!(default_bands(40), SINGLE_BAND.to_vec());

        let subnets = plan_subnets(40, &default_bands(40)).unwrap();
        assert_eq!(subnets.len(), 1);
        assert!(subnets[0].capacity >= 40);

        let mut rng = StdRng::seed_from_u64(3);
        let allocation = allocate(subnets, &default_role_distribution(40), &mut rng).unwrap();
        assert_eq!(allocation.total_hosts(), 40);
    }

    #[test]
    fn test_bands_over_hundred_percent() {
        let bands = [DensityBand::new(60, 50), DensityBand::new(50, 50)];
        assert!(matches!(
            count_subnets(1000, &bands),
            Err(PlanError::InvalidDistribution(_))
        ));
    }

    /// A failed allocation must not create the output file
    #[test]
    fn test_capacity_mismatch_writes_nothing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("never.json");

        let subnets = vec![
            Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 254),
            Subnet::new(Ipv4Addr::new(10, 0, 1, 0), 245),
        ];
        let roles = default_role_distribution(500);
        let mut rng = StdRng::seed_from_u64(4);

        let result = allocate(subnets, &roles, &mut rng).and_then(|allocation| {
            write_hosts_to_file(&output, &allocation, IpLayout::Random, true, &mut rng).unwrap();
            Ok(allocation)
        });
        assert_eq!(
            result.unwrap_err(),
            AllocationError::CapacityMismatch { capacity: 499, requested: 500 }
        );
        assert!(!output.exists());

        // Same through the full pipeline: 501 nodes only fit 500 slots and are refused
        let mut config = Config::with_nodes(501);
        config.output.path = Some(output.clone());
        assert!(generate_network(&config).is_err());
        assert!(!output.exists());
    }

    /// Counts the default bands cannot hold are refused up front, and the
    /// suggested replacement always generates
    #[test]
    fn test_uneven_node_counts_are_caught_by_validation() {
        let mut rng = StdRng::seed_from_u64(6);
        for nodes in 51..=260 {
            let config = Config::with_nodes(nodes);
            match config.validate() {
                Ok(()) => {
                    let (allocation, _) = build_allocation(&config, "corp.local", &mut rng).unwrap();
                    assert_eq!(allocation.total_hosts(), nodes);
                }
                Err(ValidationError::UnevenNodeCount { suggested, capacity, .. }) => {
                    assert!(capacity < nodes);
                    assert!(suggested > nodes);
                    assert!(Config::with_nodes(suggested).validate().is_ok());
                }
                Err(e) => panic!("unexpected error for {} nodes: {}", nodes, e),
            }
        }
    }

    #[test]
    fn test_zero_nodes() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("empty.json");

        let mut config = Config::with_nodes(0);
        config.output.path = Some(output.clone());

        let report = generate_network(&config).unwrap();
        assert_eq!(report.subnets, 0);
        assert_eq!(report.hosts, 0);
        assert!(read_hosts(&output).is_empty());
    }

    #[test]
    fn test_default_distribution_conserves_total() {
        for total in (0..2000).step_by(37).chain([1, 99, 100, 101, 4_000]) {
            let counts = default_role_distribution(total);
            assert_eq!(counts.total(), total, "total {}", total);
            for role in Role::ALL {
                if role != Role::Unknown {
                    assert_eq!(counts.get(role), total * role.default_percent() / 100);
                }
            }
        }
    }

    #[test]
    fn test_yaml_config_drives_generation() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("from_yaml.json");

        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
general:
  nodes: 200
  seed: 11
network:
  bands:
    - nodes: 50
      density: 40
    - nodes: 50
      density: 100
  domain: lab.example
roles:
  voip_phones: 30
  "Mail servers": 2
output:
  path: {}
  pretty: false
"#,
            output.display()
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let (allocation, roles) = build_allocation(&config, "lab.example", &mut rng).unwrap();
        // 100 nodes in groups of 101, then 100 nodes in groups of 254
        assert_eq!(allocation.subnets.len(), 2);
        assert_eq!(roles.get(Role::VoipPhone), 30);
        assert_eq!(roles.get(Role::MailServer), 2);

        let report = generate_network(&config).unwrap();
        assert_eq!(report.hosts, 200);
        assert_eq!(report.domain, "lab.example");

        let hosts = read_hosts(&output);
        let voip = hosts.iter().filter(|h| h.role.role == Role::VoipPhone).count();
        assert_eq!(voip, 30);
    }

    #[test]
    fn test_role_overrides_exceeding_total_fail() {
        let mut config = Config::with_nodes(100);
        config.roles = BTreeMap::from([(Role::Printer, 80), (Role::SshServer, 30)]);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(build_allocation(&config, "corp.local", &mut rng).is_err());
    }
}
