//! Property tests over the public domain API.

#![allow(clippy::unwrap_used)]

use podbridge_cli::domain::config::resolve_vm_name;
use podbridge_cli::domain::connection::{connection_names, ssh_uri};
use podbridge_cli::domain::registry::{ConnectionRecord, uri_port};
use proptest::prelude::*;

fn vm_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}"
}

proptest! {
    /// Every URI podbridge writes reads back as pointing at its port.
    #[test]
    fn written_uri_points_at_its_port(user in "[a-z_][a-z0-9_]{0,15}", port in 1i64..=65535) {
        let record = ConnectionRecord {
            name: "colima".into(),
            identity: String::new(),
            uri: ssh_uri(&user, port),
        };
        let expected = port.to_string();
        prop_assert_eq!(uri_port(&record.uri), Some(expected.as_str()));
        prop_assert!(record.points_at(port));
        prop_assert!(!record.points_at(port + 1));
    }

    /// A socket path after the port keeps the URI from matching that port.
    #[test]
    fn socket_suffix_is_part_of_the_segment(port in 1i64..=65535, socket in "(/[a-z0-9]{1,8}){1,4}") {
        let uri = format!("ssh://u@localhost:{port}{socket}");
        let expected = format!("{port}{socket}");
        prop_assert_eq!(uri_port(&uri), Some(expected.as_str()));
        let record = ConnectionRecord { name: "colima".into(), identity: String::new(), uri };
        prop_assert!(!record.points_at(port));
    }

    /// Named profiles always yield a distinct VM carrying the base as prefix.
    #[test]
    fn named_profile_extends_base(base in vm_name(), profile in "[a-z][a-z0-9]{0,8}") {
        prop_assume!(profile != "default" && profile != "colima" && profile != base);
        let resolved = resolve_vm_name(&base, Some(&profile));
        prop_assert!(resolved.starts_with(&base));
        prop_assert_eq!(resolved, format!("{base}-{profile}"));
    }

    /// Both owned names carry the VM name as their prefix.
    #[test]
    fn owned_names_share_prefix(name in vm_name()) {
        let [rootless, rootful] = connection_names(&name);
        prop_assert_eq!(&rootless, &name);
        prop_assert!(rootful.starts_with(&name));
        prop_assert!(rootful.ends_with("-root"));
    }
}
