// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

fn list_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive text to look for"),
    )
    .arg(
        Arg::new("period")
            .long("period")
            .help("today | week | month")
            .conflicts_with_all(["from", "to"]),
    )
    .arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
    .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
    .arg(
        Arg::new("today")
            .long("today")
            .value_name("YYYY-MM-DD")
            .help("Reference day for --period (defaults to the local date)"),
    )
    .arg(
        Arg::new("limit")
            .long("limit")
            .value_parser(value_parser!(usize)),
    )
    .arg(json_flag().conflicts_with("jsonl"))
    .arg(jsonl_flag())
}

fn json_flag() -> Arg {
    Arg::new("json").long("json").action(ArgAction::SetTrue)
}

fn jsonl_flag() -> Arg {
    Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn purchase_fields(cmd: Command, adding: bool) -> Command {
    cmd.arg(Arg::new("supplier").long("supplier"))
        .arg(Arg::new("location").long("location").help("Location of origin"))
        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
        .arg(Arg::new("quantity").long("quantity").value_name("KG"))
        .arg(Arg::new("price").long("price").help("Price per kg"))
        .arg(
            Arg::new("payment")
                .long("payment")
                .required(adding)
                .help("Cash | M-Pesa | Bank Transfer"),
        )
        .arg(Arg::new("truck").long("truck").help("Truck number plate"))
        .arg(Arg::new("origin_weight").long("origin-weight").value_name("KG"))
        .arg(
            Arg::new("destination_weight")
                .long("destination-weight")
                .value_name("KG"),
        )
}

fn sale_fields(cmd: Command, adding: bool) -> Command {
    cmd.arg(Arg::new("customer").long("customer"))
        .arg(Arg::new("phone").long("phone").help("Driver phone"))
        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
        .arg(Arg::new("quantity").long("quantity").value_name("KG"))
        .arg(Arg::new("price").long("price").help("Selling price per bag"))
        .arg(
            Arg::new("payment")
                .long("payment")
                .help("Cash | M-Pesa | Bank Transfer | Cheque"),
        )
        .arg(
            Arg::new("deposited")
                .long("deposited")
                .help("Labor cost paid out of the proceeds"),
        )
        .arg(
            Arg::new("cheque")
                .long("cheque")
                .help("Gross proceeds collected"),
        )
        .arg(
            Arg::new("delivery")
                .long("delivery")
                .required(adding)
                .help("Delivery | Pick-up"),
        )
        .arg(
            Arg::new("quality")
                .long("quality")
                .required(adding)
                .help("Good | Poor | Bad"),
        )
        .arg(Arg::new("note").long("note"))
}

fn laborer_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
        .arg(
            Arg::new("count")
                .long("count")
                .help("Number of laborers")
                .value_parser(value_parser!(u32)),
        )
        .arg(Arg::new("total").long("total").help("Total labour cost"))
}

fn crud(name: &'static str, about: &'static str, fields: impl Fn(Command, bool) -> Command) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(fields(Command::new("add"), true))
        .subcommand(fields(Command::new("edit").arg(id_arg()), false))
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(list_args(Command::new("list")))
}

pub fn build_cli() -> Command {
    Command::new("maizebiz")
        .version(clap::crate_version!())
        .about("Purchases, sales and laborer payments for a maize business")
        .arg(
            Arg::new("db")
                .long("db")
                .env("MAIZEBIZ_DB")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("SQLite file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .env("MAIZEBIZ_USER")
                .global(true)
                .default_value("local")
                .help("Owner of the records read and written"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(crud("purchase", "Maize bought from suppliers", purchase_fields))
        .subcommand(crud("sale", "Maize sold to customers", sale_fields))
        .subcommand(crud("laborer", "Payments to casual laborers", |c, _| {
            laborer_fields(c)
        }))
        .subcommand(
            Command::new("dashboard")
                .about("Totals and a daily chart")
                .arg(
                    Arg::new("range")
                        .long("range")
                        .default_value("7days")
                        .help("7days | 30days | 90days"),
                )
                .arg(Arg::new("today").long("today").value_name("YYYY-MM-DD"))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("export")
                .about("Write records to a file")
                .subcommand_required(true)
                .subcommands(["purchases", "sales", "laborers"].map(|kind| {
                    Command::new(kind)
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                })),
        )
        .subcommand(
            Command::new("settings")
                .about("Persisted preferences")
                .subcommand_required(true)
                .subcommand(
                    Command::new("currency")
                        .about("Show or set the display currency")
                        .arg(Arg::new("code")),
                ),
        )
}
