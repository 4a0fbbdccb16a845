use crate::{config, error, server, warning};

pub async fn serve(open: bool) {
    if open {
        let url = format!("http://{}/static/", config::server_addr());
        // give the listener a moment before the browser hits it
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(300)).await;
            if webbrowser::open(&url).is_err() {
                warning!("Could not open a browser. Visit {} manually.", url);
            }
        });
    }

    if let Err(e) = server::start_api_server(server::AppState::from_env()).await {
        error!("Server stopped. Err: {}", e);
    }
}
