pub mod wind_routes;
