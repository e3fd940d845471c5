/// ICE configuration for the underlying connection.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub ice_servers: Vec<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec!["stun:stun.l.google.com:19302".to_owned()],
        }
    }
}
