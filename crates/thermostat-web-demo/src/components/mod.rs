pub mod thermostat;
