pub mod mock_auth_server;
