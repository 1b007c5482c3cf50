use anyhow::{bail, Result};
use colored::*;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{self, Write};

const RIDE_STATUSES: [&str; 4] = ["ASSIGNED", "IN_PROGRESS", "COMPLETED", "CANCELLED"];

#[derive(Debug, Deserialize)]
struct Driver {
    id: String,
    name: String,
    is_available: bool,
}

#[derive(Debug, Deserialize)]
struct Passenger {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Ride {
    id: String,
    #[serde(rename = "passengerId")]
    passenger_id: String,
    #[serde(rename = "driverId")]
    driver_id: String,
    from_zone: String,
    to_zone: String,
    price: f64,
    status: String,
    #[serde(rename = "paymentStatus")]
    payment_status: String,
    #[serde(rename = "createdAt")]
    created_at: String,
}

struct Api {
    client: Client,
    users_url: String,
    rides_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚕 RideNow CLI".bright_blue().bold());
    println!("{}", "==============".bright_blue());

    let api = Api {
        client: Client::new(),
        users_url: env_or("USERS_SERVICE_URL", "http://localhost:3000"),
        rides_url: env_or("RIDES_SERVICE_URL", "http://localhost:8080"),
    };
    println!("👥 Usuarios: {}", api.users_url);
    println!("🚕 Viajes:   {}", api.rides_url);

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Conductores");
        println!("2. 🧍 Pasajeros");
        println!("3. 🛣️  Viajes");
        println!("4. 🚪 Salir");

        let result = match prompt("Selecciona una opción (1-4): ")?.as_str() {
            "1" => drivers_menu(&api).await,
            "2" => passengers_menu(&api).await,
            "3" => rides_menu(&api).await,
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        // Un fallo de red no cierra la sesión
        if let Err(e) = result {
            println!("{} {}", "❌ Error:".bright_red(), e);
        }
    }

    Ok(())
}

async fn drivers_menu(api: &Api) -> Result<()> {
    println!();
    println!("{}", "🚗 CONDUCTORES".bright_cyan().bold());
    println!("1. Registrar conductor");
    println!("2. Listar conductores");
    println!("3. Listar conductores disponibles");
    println!("4. Cambiar disponibilidad");
    println!("5. Ver conductor");

    match prompt("Opción: ")?.as_str() {
        "1" => {
            let name = prompt_required("Nombre del conductor: ")?;
            let response = api
                .client
                .post(format!("{}/drivers", api.users_url))
                .json(&json!({ "name": name }))
                .send()
                .await?;
            print_json("✅ Conductor creado:", &read_json(response).await?)?;
        }
        choice @ ("2" | "3") => {
            let drivers = fetch_drivers(api, choice == "3").await?;
            if drivers.is_empty() {
                println!("{}", "ℹ️ No hay conductores.".bright_yellow());
            }
            for driver in &drivers {
                println!(
                    "- {} [{}] {}",
                    driver.name.bold(),
                    driver.id,
                    availability_label(driver.is_available)
                );
            }
        }
        "4" => {
            let drivers = fetch_drivers(api, false).await?;
            let labels: Vec<String> = drivers
                .iter()
                .map(|d| format!("{} ({})", d.name, availability_label(d.is_available)))
                .collect();
            let Some(index) = choose("Selecciona conductor", &labels)? else {
                return Ok(());
            };
            let is_available = confirm("¿Marcar como disponible?", true)?;
            let response = api
                .client
                .patch(format!("{}/drivers/{}/status", api.users_url, drivers[index].id))
                .json(&json!({ "is_available": is_available }))
                .send()
                .await?;
            print_json("✅ Disponibilidad actualizada:", &read_json(response).await?)?;
        }
        "5" => {
            let id = prompt_required("ID del conductor: ")?;
            let response = api
                .client
                .get(format!("{}/drivers/{}", api.users_url, id))
                .send()
                .await?;
            print_json("🚗 Conductor:", &read_json(response).await?)?;
        }
        _ => println!("{}", "❌ Opción inválida.".bright_red()),
    }
    Ok(())
}

async fn passengers_menu(api: &Api) -> Result<()> {
    println!();
    println!("{}", "🧍 PASAJEROS".bright_cyan().bold());
    println!("1. Registrar pasajero");
    println!("2. Listar pasajeros");
    println!("3. Ver pasajero");
    println!("4. Renombrar pasajero");
    println!("5. Eliminar pasajero");

    match prompt("Opción: ")?.as_str() {
        "1" => {
            let name = prompt_required("Nombre del pasajero: ")?;
            let response = api
                .client
                .post(format!("{}/passengers", api.users_url))
                .json(&json!({ "name": name }))
                .send()
                .await?;
            print_json("✅ Pasajero creado:", &read_json(response).await?)?;
        }
        "2" => {
            let passengers = fetch_passengers(api).await?;
            if passengers.is_empty() {
                println!("{}", "ℹ️ No hay pasajeros.".bright_yellow());
            }
            for passenger in &passengers {
                println!("- {} [{}]", passenger.name.bold(), passenger.id);
            }
        }
        choice @ ("3" | "4" | "5") => {
            let passengers = fetch_passengers(api).await?;
            let labels: Vec<String> = passengers
                .iter()
                .map(|p| format!("{} ({})", p.name, p.id))
                .collect();
            let Some(index) = choose("Selecciona pasajero", &labels)? else {
                return Ok(());
            };
            let url = format!("{}/passengers/{}", api.users_url, passengers[index].id);

            match choice {
                "3" => {
                    let response = api.client.get(&url).send().await?;
                    print_json("🧍 Pasajero:", &read_json(response).await?)?;
                }
                "4" => {
                    let name = prompt_required("Nuevo nombre: ")?;
                    let response = api
                        .client
                        .put(&url)
                        .json(&json!({ "name": name }))
                        .send()
                        .await?;
                    print_json("✅ Pasajero actualizado:", &read_json(response).await?)?;
                }
                _ => {
                    if !confirm("¿Seguro que quieres eliminarlo?", false)? {
                        println!("Eliminación cancelada");
                        return Ok(());
                    }
                    let response = api.client.delete(&url).send().await?;
                    ensure_success(response).await?;
                    println!("{}", "🗑️ Pasajero eliminado".bright_green());
                }
            }
        }
        _ => println!("{}", "❌ Opción inválida.".bright_red()),
    }
    Ok(())
}

async fn rides_menu(api: &Api) -> Result<()> {
    println!();
    println!("{}", "🛣️  VIAJES".bright_cyan().bold());
    println!("1. Solicitar viaje");
    println!("2. Ver viaje");
    println!("3. Listar viajes");
    println!("4. Cambiar estado");

    match prompt("Opción: ")?.as_str() {
        "1" => {
            let passengers = fetch_passengers(api).await?;
            if passengers.is_empty() {
                println!("{}", "ℹ️ No hay pasajeros. Registra uno primero.".bright_yellow());
                return Ok(());
            }
            let labels: Vec<String> = passengers
                .iter()
                .map(|p| format!("{} ({})", p.name, p.id))
                .collect();
            let Some(index) = choose("Selecciona pasajero", &labels)? else {
                return Ok(());
            };
            let from_zone = prompt_required("Zona de origen: ")?;
            let to_zone = prompt_required("Zona de destino: ")?;

            let response = api
                .client
                .post(format!("{}/rides", api.rides_url))
                .json(&json!({
                    "passengerId": passengers[index].id,
                    "from_zone": from_zone,
                    "to_zone": to_zone,
                }))
                .send()
                .await?;
            let ride: Ride = serde_json::from_value(read_json(response).await?)?;
            println!("{}", "✅ Viaje creado".bright_green().bold());
            print_ride(&ride);
        }
        "2" => {
            let rides = fetch_rides(api, None).await?;
            let Some(index) = choose_ride(&rides)? else {
                return Ok(());
            };
            let response = api
                .client
                .get(format!("{}/rides/{}", api.rides_url, rides[index].id))
                .send()
                .await?;
            let ride: Ride = serde_json::from_value(read_json(response).await?)?;
            print_ride(&ride);
        }
        "3" => {
            let filter = prompt("Filtrar por estado (vacío = todos): ")?;
            let filter = Some(filter.to_uppercase()).filter(|s| !s.is_empty());
            let rides = fetch_rides(api, filter.as_deref()).await?;
            if rides.is_empty() {
                println!("{}", "ℹ️ No hay viajes.".bright_yellow());
            }
            for ride in &rides {
                print_ride(ride);
            }
        }
        "4" => {
            let rides = fetch_rides(api, None).await?;
            let Some(index) = choose_ride(&rides)? else {
                return Ok(());
            };
            let statuses: Vec<String> = RIDE_STATUSES.iter().map(|s| s.to_string()).collect();
            let Some(status) = choose("Nuevo estado", &statuses)? else {
                return Ok(());
            };

            let response = api
                .client
                .patch(format!("{}/rides/{}/status", api.rides_url, rides[index].id))
                .json(&json!({ "status": RIDE_STATUSES[status] }))
                .send()
                .await?;
            let ride: Ride = serde_json::from_value(read_json(response).await?)?;
            println!("{}", "✅ Estado actualizado".bright_green().bold());
            print_ride(&ride);

            if ride.status == "COMPLETED" {
                println!("💳 Pago: {}", ride.payment_status);
                println!("🚗 El conductor vuelve a estar disponible");
            }
        }
        _ => println!("{}", "❌ Opción inválida.".bright_red()),
    }
    Ok(())
}

async fn fetch_drivers(api: &Api, only_available: bool) -> Result<Vec<Driver>> {
    let mut url = format!("{}/drivers", api.users_url);
    if only_available {
        url.push_str("?available=true");
    }
    let response = api.client.get(url).send().await?;
    Ok(serde_json::from_value(read_json(response).await?)?)
}

async fn fetch_passengers(api: &Api) -> Result<Vec<Passenger>> {
    let response = api
        .client
        .get(format!("{}/passengers", api.users_url))
        .send()
        .await?;
    Ok(serde_json::from_value(read_json(response).await?)?)
}

async fn fetch_rides(api: &Api, status: Option<&str>) -> Result<Vec<Ride>> {
    let mut url = format!("{}/rides", api.rides_url);
    if let Some(status) = status {
        url.push_str(&format!("?status={}", status));
    }
    let response = api.client.get(url).send().await?;
    Ok(serde_json::from_value(read_json(response).await?)?)
}

/// Devuelve el cuerpo JSON o un error con el mensaje del servicio
async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    if !status.is_success() {
        let message = body["message"].as_str().unwrap_or("sin detalle").to_string();
        bail!("{} - {}", status, message);
    }
    Ok(body)
}

async fn ensure_success(response: Response) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        let body: Value = response.json().await.unwrap_or(Value::Null);
        bail!("{} - {}", status, body["message"].as_str().unwrap_or("sin detalle"));
    }
    Ok(())
}

fn print_json(title: &str, value: &Value) -> Result<()> {
    println!("{}", title.bright_green().bold());
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_ride(ride: &Ride) {
    println!();
    println!("{} {}", "ID:".bright_blue(), ride.id);
    println!("Pasajero: {}", ride.passenger_id);
    println!("Conductor: {}", ride.driver_id);
    println!("Ruta: {} → {}", ride.from_zone, ride.to_zone);
    println!("Precio: ${:.2}", ride.price);
    println!("Estado: {}", ride.status.bold());
    println!("Pago: {}", ride.payment_status);
    println!("Creado: {}", ride.created_at);
    println!("---");
}

fn availability_label(is_available: bool) -> ColoredString {
    if is_available {
        "Disponible".bright_green()
    } else {
        "Ocupado".bright_red()
    }
}

fn choose_ride(rides: &[Ride]) -> Result<Option<usize>> {
    let labels: Vec<String> = rides
        .iter()
        .map(|r| format!("{} - {} → {} ({})", r.id, r.from_zone, r.to_zone, r.status))
        .collect();
    choose("Selecciona viaje", &labels)
}

/// Lista numerada; `None` si no hay opciones o la entrada no es válida
fn choose(title: &str, options: &[String]) -> Result<Option<usize>> {
    if options.is_empty() {
        println!("{}", "ℹ️ No hay elementos para elegir.".bright_yellow());
        return Ok(None);
    }

    println!("{}", title.bright_cyan());
    for (i, option) in options.iter().enumerate() {
        println!("{}. {}", i + 1, option);
    }

    let answer = prompt(&format!("Número (1-{}): ", options.len()))?;
    match answer.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Ok(Some(n - 1)),
        _ => {
            println!("{}", "❌ Selección inválida.".bright_red());
            Ok(None)
        }
    }
}

fn confirm(question: &str, default: bool) -> Result<bool> {
    let hint = if default { "S/n" } else { "s/N" };
    let answer = prompt(&format!("{} ({}): ", question, hint))?.to_lowercase();
    Ok(match answer.as_str() {
        "s" | "si" | "sí" | "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    })
}

fn prompt_required(label: &str) -> Result<String> {
    loop {
        let value = prompt(label)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("{}", "⚠️ Campo obligatorio".bright_yellow());
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
