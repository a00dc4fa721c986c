//! Diesel table definitions for the ERP schema.
//!
//! These definitions must match what `migrations::ensure_schema` creates
//! (plus the column additions layered on top). Column types stay within the
//! set both supported backends can represent: integers, doubles, text,
//! dates, naive timestamps, and booleans. Status columns store their display
//! label as text; the label enums in the domain decode them.

diesel::table! {
    /// Legal entities that own projects, users, and ledgers.
    companies (id) {
        id -> Integer,
        name -> Text,
        fiscal_year_start -> Nullable<Date>,
        base_currency -> Text,
        registration_number -> Nullable<Text>,
        address -> Nullable<Text>,
    }
}

diesel::table! {
    /// Operating locations under a company.
    branches (id) {
        id -> Integer,
        company_id -> Nullable<Integer>,
        name -> Text,
        location -> Nullable<Text>,
    }
}

diesel::table! {
    /// Registered accounts. `email` is unique; `username` holds the
    /// display name.
    users (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        role -> Text,
        company_id -> Nullable<Integer>,
        branch_id -> Nullable<Integer>,
        is_active -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Append-only activity trail. Never updated, never cascaded.
    audit_records (id) {
        id -> Integer,
        user_id -> Nullable<Integer>,
        action -> Text,
        details -> Nullable<Text>,
        timestamp -> Timestamp,
    }
}

diesel::table! {
    /// Construction projects.
    projects (id) {
        id -> Integer,
        name -> Text,
        /// Legacy free-text client reference; `client_id` supersedes it.
        client -> Nullable<Text>,
        start_date -> Nullable<Date>,
        end_date -> Nullable<Date>,
        status -> Text,
        total_budget -> Double,
        currency -> Text,
        company_id -> Nullable<Integer>,
        branch_id -> Nullable<Integer>,
        client_id -> Nullable<Integer>,
        description -> Nullable<Text>,
        progress -> Integer,
    }
}

diesel::table! {
    /// CRM clients.
    clients (id) {
        id -> Integer,
        name -> Text,
        company -> Nullable<Text>,
        email -> Nullable<Text>,
        phone -> Nullable<Text>,
        address -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Supplying vendors.
    vendors (id) {
        id -> Integer,
        name -> Text,
        contact_person -> Nullable<Text>,
        phone -> Nullable<Text>,
        email -> Nullable<Text>,
        rating -> Integer,
    }
}

diesel::table! {
    /// Purchase orders raised against vendors.
    purchase_orders (id) {
        id -> Integer,
        vendor_id -> Nullable<Integer>,
        order_date -> Date,
        expected_delivery -> Nullable<Date>,
        total_amount -> Double,
        currency -> Text,
        status -> Text,
    }
}

diesel::table! {
    /// Stock items. `current_stock` never goes negative; the adapter
    /// enforces it inside the adjustment transaction.
    inventory_items (id) {
        id -> Integer,
        name -> Text,
        category -> Nullable<Text>,
        current_stock -> Double,
        unit -> Nullable<Text>,
        min_stock_alert -> Double,
        location -> Nullable<Text>,
        last_updated -> Timestamp,
    }
}

diesel::table! {
    /// Machinery and vehicles.
    assets (id) {
        id -> Integer,
        name -> Text,
        #[sql_name = "type"]
        kind -> Nullable<Text>,
        purchase_date -> Nullable<Date>,
        last_service_date -> Nullable<Date>,
        next_service_due -> Nullable<Date>,
        status -> Text,
    }
}

diesel::table! {
    /// Daily usage logs per asset.
    asset_logs (id) {
        id -> Integer,
        asset_id -> Nullable<Integer>,
        date -> Date,
        hours_used -> Double,
        fuel_consumed -> Double,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    /// Income and expense postings.
    finance_records (id) {
        id -> Integer,
        date -> Date,
        #[sql_name = "type"]
        kind -> Text,
        category -> Nullable<Text>,
        amount -> Double,
        currency -> Text,
        exchange_rate -> Double,
        company_id -> Nullable<Integer>,
        branch_id -> Nullable<Integer>,
        description -> Nullable<Text>,
        payment_method -> Nullable<Text>,
    }
}

diesel::table! {
    /// Staff and site workers, discriminated by `contract_type`.
    employees (id) {
        id -> Integer,
        name -> Text,
        role -> Nullable<Text>,
        department -> Nullable<Text>,
        joining_date -> Nullable<Date>,
        salary -> Double,
        contract_type -> Nullable<Text>,
        is_active -> Bool,
    }
}

diesel::table! {
    /// One payroll row per employee per "YYYY-MM" month.
    payroll (id) {
        id -> Integer,
        employee_id -> Nullable<Integer>,
        month -> Text,
        basic_salary -> Nullable<Double>,
        deductions -> Double,
        net_salary -> Nullable<Double>,
        status -> Text,
    }
}

diesel::table! {
    /// One attendance row per employee per day.
    attendance (id) {
        id -> Integer,
        employee_id -> Nullable<Integer>,
        date -> Date,
        status -> Text,
        hours_worked -> Double,
    }
}

diesel::table! {
    /// Plant output logs.
    production_logs (id) {
        id -> Integer,
        date -> Date,
        project_id -> Nullable<Integer>,
        quantity_produced -> Double,
        efficiency -> Nullable<Double>,
        waste_generated -> Double,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    /// Licensed software inventory.
    software_assets (id) {
        id -> Integer,
        name -> Text,
        version -> Nullable<Text>,
        license_key -> Nullable<Text>,
        expiry_date -> Nullable<Date>,
        status -> Text,
        assigned_to -> Nullable<Text>,
    }
}

diesel::table! {
    /// Planned and completed maintenance per asset.
    maintenance_schedules (id) {
        id -> Integer,
        asset_id -> Nullable<Integer>,
        task_name -> Text,
        scheduled_date -> Nullable<Date>,
        performed_date -> Nullable<Date>,
        status -> Text,
        cost -> Double,
        technician -> Nullable<Text>,
    }
}

diesel::table! {
    /// Receivable invoices. `invoice_number` is unique.
    invoices (id) {
        id -> Integer,
        project_id -> Nullable<Integer>,
        invoice_number -> Text,
        date_issued -> Date,
        due_date -> Nullable<Date>,
        amount -> Double,
        status -> Text,
    }
}

diesel::table! {
    /// Payable bills.
    bills (id) {
        id -> Integer,
        vendor_id -> Nullable<Integer>,
        po_id -> Nullable<Integer>,
        bill_number -> Nullable<Text>,
        date_received -> Date,
        due_date -> Nullable<Date>,
        amount -> Double,
        status -> Text,
    }
}

diesel::table! {
    /// Health, safety, and environment incidents.
    hse_records (id) {
        id -> Integer,
        date -> Date,
        project_id -> Nullable<Integer>,
        incident_type -> Nullable<Text>,
        description -> Nullable<Text>,
        action_taken -> Nullable<Text>,
        reported_by -> Nullable<Text>,
        status -> Text,
    }
}

diesel::table! {
    /// Quality checks against production logs.
    quality_checks (id) {
        id -> Integer,
        date -> Date,
        production_id -> Nullable<Integer>,
        parameter -> Nullable<Text>,
        result -> Nullable<Text>,
        remarks -> Nullable<Text>,
    }
}

diesel::table! {
    /// Site document registry. Stores paths, not blobs.
    document_assets (id) {
        id -> Integer,
        title -> Text,
        category -> Nullable<Text>,
        file_path -> Nullable<Text>,
        upload_date -> Date,
        project_id -> Nullable<Integer>,
    }
}

diesel::table! {
    /// Employee training history.
    training_records (id) {
        id -> Integer,
        employee_id -> Nullable<Integer>,
        training_name -> Nullable<Text>,
        date_completed -> Nullable<Date>,
        expiry_date -> Nullable<Date>,
        score -> Nullable<Text>,
    }
}

diesel::table! {
    /// Client contracts, optionally linked to a delivering project.
    contracts (id) {
        id -> Integer,
        title -> Text,
        client_id -> Nullable<Integer>,
        project_id -> Nullable<Integer>,
        contract_value -> Double,
        start_date -> Nullable<Date>,
        end_date -> Nullable<Date>,
        status -> Text,
        terms -> Nullable<Text>,
    }
}

diesel::table! {
    /// Key-value system settings. `key` is unique.
    system_settings (id) {
        id -> Integer,
        category -> Nullable<Text>,
        key -> Text,
        value -> Nullable<Text>,
        description -> Nullable<Text>,
    }
}
