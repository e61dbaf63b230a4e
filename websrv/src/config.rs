// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

use albums_storage::gatekeeper::Config as GatekeeperConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    pub(crate) network: NetworkConfig,
    pub(crate) storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NetworkConfig {
    pub(crate) endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EndpointConfig {
    pub(crate) ip_addr: IpAddr,
    pub(crate) port: u16,
}

const ENDPOINT_PORT_DEFAULT: u16 = 8080;

impl EndpointConfig {
    pub(crate) const fn new_v4_localhost() -> Self {
        Self {
            ip_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ENDPOINT_PORT_DEFAULT,
        }
    }

    pub(crate) fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new_v4_localhost()
    }
}

/// Timeouts for accessing the shared album collection.
pub(crate) type StorageConfig = GatekeeperConfig;
