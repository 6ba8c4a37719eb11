//! Mock push server for integration tests.
//!
//! A small WebSocket server that can:
//! - Accept connections
//! - Record received messages (the authentication frame)
//! - Push frames to all connected clients
//! - Kick clients with a server-side close

use futures_util::{SinkExt, StreamExt};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Command sent to a connected client's writer task.
#[derive(Debug, Clone)]
enum ClientCommand {
    Frame(String),
    Close,
}

/// A mock push server for testing.
pub struct MockPushServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    messages: Arc<Mutex<VecDeque<String>>>,
    connections: Arc<Mutex<u32>>,
    clients: Arc<Mutex<Vec<mpsc::UnboundedSender<ClientCommand>>>>,
}

impl MockPushServer {
    /// Start a new mock server on an available port.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let messages: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(VecDeque::new()));
        let connections: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
        let clients: Arc<Mutex<Vec<mpsc::UnboundedSender<ClientCommand>>>> =
            Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let messages_clone = messages.clone();
        let connections_clone = connections.clone();
        let clients_clone = clients.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Ok((stream, _)) = listener.accept() => {
                        let messages = messages_clone.clone();
                        let connections = connections_clone.clone();
                        let (tx, rx) = mpsc::unbounded_channel();
                        clients_clone.lock().await.push(tx);
                        tokio::spawn(handle_connection(stream, messages, connections, rx));
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            messages,
            connections,
            clients,
        }
    }

    /// HTTP origin of the server; `PushChannel` derives `ws://.../ws` from it.
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of connections received.
    pub async fn connection_count(&self) -> u32 {
        *self.connections.lock().await
    }

    /// All messages received from clients.
    pub async fn received_messages(&self) -> Vec<String> {
        self.messages.lock().await.iter().cloned().collect()
    }

    /// Push one text frame to every connected client.
    pub async fn push_frame(&self, frame: impl Into<String>) {
        let frame = frame.into();
        for client in self.clients.lock().await.iter() {
            let _ = client.send(ClientCommand::Frame(frame.clone()));
        }
    }

    /// Close every connected client from the server side.
    pub async fn kick_clients(&self) {
        for client in self.clients.lock().await.iter() {
            let _ = client.send(ClientCommand::Close);
        }
    }

    /// Shutdown the accept loop.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn handle_connection(
    stream: TcpStream,
    messages: Arc<Mutex<VecDeque<String>>>,
    connections: Arc<Mutex<u32>>,
    mut commands: mpsc::UnboundedReceiver<ClientCommand>,
) {
    {
        let mut count = connections.lock().await;
        *count += 1;
    }

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("WebSocket handshake failed: {e}");
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            command = commands.recv() => {
                match command {
                    Some(ClientCommand::Frame(frame)) => {
                        if write.send(Message::Text(frame)).await.is_err() {
                            break;
                        }
                    }
                    Some(ClientCommand::Close) => {
                        let _ = write.send(Message::Close(None)).await;
                        break;
                    }
                    None => break,
                }
            }
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        messages.lock().await.push_back(text);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = write.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_starts() {
        let server = MockPushServer::start().await;
        assert!(server.origin().starts_with("http://127.0.0.1:"));
        server.shutdown().await;
    }
}
